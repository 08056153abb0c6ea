//! Per-page item collection and the placement pipeline.
//!
//! A [`PageLayout`] owns the placed items of one page in insertion order.
//! Adding an item runs the full pipeline: grid snap, overlap resolution,
//! row grouping and form-field inference. Pages share no state, so separate
//! pages can be built on separate threads and merged afterwards.

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use crate::geometry::Rect;
use crate::item::ContentItem;
use crate::options::LayoutOptions;
use crate::placer::{Placer, snap_to_grid};

/// Items the engine judged to sit on the same visual line.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    /// Shared row id, or `None` for a lone unplaced item.
    pub row_group: Option<u32>,
    /// Items in this row, sorted left-to-right.
    pub items: Vec<&'a ContentItem>,
}

impl Row<'_> {
    /// Smallest `top` among the row's items.
    pub fn top(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.bbox().top())
            .fold(f64::INFINITY, f64::min)
    }

    /// Bounding box of the whole row.
    pub fn bbox(&self) -> Option<Rect> {
        self.items
            .iter()
            .map(|item| item.bbox())
            .reduce(|acc, b| acc.union(&b))
    }
}

/// An inferred label/value pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormField<'a> {
    pub label: &'a ContentItem,
    pub value: &'a ContentItem,
}

/// Summary counts for one page.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutStats {
    pub total_items: usize,
    pub total_rows: usize,
    pub label_count: usize,
    pub value_count: usize,
    pub header_count: usize,
    /// Average number of items per row; 0.0 when the page has no rows.
    pub avg_items_per_row: f64,
}

/// The placed items of a single page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    page_number: u32,
    items: Vec<ContentItem>,
    /// Highest row id issued on this page; the next fresh row gets `+ 1`.
    max_row_id: u32,
    /// `(label index, value index)` into `items`.
    fields: Vec<(usize, usize)>,
}

impl PageLayout {
    pub fn new(page_number: u32) -> Self {
        Self {
            page_number,
            ..Self::default()
        }
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Placed items in insertion order.
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Highest row id assigned so far (0 when the page is empty).
    pub fn max_row_id(&self) -> u32 {
        self.max_row_id
    }

    /// Place `item` on this page and return a snapshot of the placed item.
    ///
    /// Previously placed items never move. Their `is_form_value` flag may
    /// change when the new item alters the label/value pairing of its row.
    ///
    /// `options` must pass [`LayoutOptions::validate`]; [`LayoutEngine`]
    /// checks this on construction, direct callers are checked in debug
    /// builds only.
    ///
    /// [`LayoutEngine`]: crate::LayoutEngine
    pub fn add_item<P: Placer + ?Sized>(
        &mut self,
        mut item: ContentItem,
        options: &LayoutOptions,
        placer: &P,
    ) -> ContentItem {
        debug_assert!(
            options.validate().is_ok(),
            "PageLayout::add_item called with invalid options: {options:?}"
        );

        if item.page_number() != self.page_number {
            warn!(
                item_page = item.page_number(),
                page = self.page_number,
                "item added to a different page than it was tagged with"
            );
            item = item.on_page(self.page_number);
        }

        let snapped = snap_to_grid(item.bbox, options.grid_size);
        if snapped != item.bbox {
            debug!(
                page = self.page_number,
                from = item.bbox.top(),
                to = snapped.top(),
                "snapped to grid"
            );
        }

        let placed = placer.place(snapped, &self.items, options);
        if placed != snapped {
            debug!(
                page = self.page_number,
                left = placed.left(),
                top = placed.top(),
                "moved clear of placed items"
            );
        }
        item.bbox = placed;
        let row = self.assign_row(&placed, options);
        item.row_group = Some(row);
        item.is_form_label = item.looks_like_label(options.max_label_len);
        item.is_form_value = false;

        let index = self.items.len();
        trace!(page = self.page_number, index, row, "placed item");
        self.items.push(item);
        self.pair_row(row);

        self.items[index].clone()
    }

    fn assign_row(&mut self, bbox: &Rect, options: &LayoutOptions) -> u32 {
        let tolerance = options.effective_row_tolerance();
        let center = bbox.center_y();
        let shared = self.items.iter().find_map(|existing| {
            existing
                .row_group
                .filter(|_| (existing.bbox.center_y() - center).abs() <= tolerance)
        });
        match shared {
            Some(row) => row,
            None => {
                self.max_row_id += 1;
                debug!(page = self.page_number, row = self.max_row_id, "opened row");
                self.max_row_id
            }
        }
    }

    /// Recompute the label/value pairs of `row` from the geometry of its
    /// items alone, so the result does not depend on insertion order.
    ///
    /// Labels are visited right-to-left; each claims the nearest unclaimed
    /// non-label item starting right of its right edge. A value thus goes to
    /// the closest label on its left, and a label whose nearest candidate was
    /// taken by a closer label moves on to the next free one.
    fn pair_row(&mut self, row: u32) {
        let row_group = Some(row);
        let items = &self.items;
        self.fields
            .retain(|&(label, _)| items[label].row_group != row_group);

        let in_row: Vec<usize> = (0..self.items.len())
            .filter(|&i| self.items[i].row_group == row_group)
            .collect();

        let mut labels: Vec<usize> = in_row
            .iter()
            .copied()
            .filter(|&i| self.items[i].is_form_label)
            .collect();
        labels.sort_by(|&a, &b| {
            let (a, b) = (&self.items[a].bbox, &self.items[b].bbox);
            b.right()
                .total_cmp(&a.right())
                .then(b.left().total_cmp(&a.left()))
        });

        let mut claimed: Vec<usize> = Vec::new();
        for label in labels {
            let right = self.items[label].bbox.right();
            let value = in_row
                .iter()
                .copied()
                .filter(|&i| {
                    !self.items[i].is_form_label
                        && !claimed.contains(&i)
                        && self.items[i].bbox.left() > right
                })
                .min_by(|&a, &b| {
                    self.items[a]
                        .bbox
                        .left()
                        .total_cmp(&self.items[b].bbox.left())
                });
            if let Some(value) = value {
                claimed.push(value);
                self.fields.push((label, value));
                debug!(
                    page = self.page_number,
                    label,
                    value,
                    "inferred form field"
                );
            }
        }

        for &i in &in_row {
            self.items[i].is_form_value = claimed.contains(&i);
        }
    }

    /// Items grouped into rows, top-to-bottom, each row left-to-right.
    pub fn rows(&self) -> Vec<Row<'_>> {
        let mut rows: Vec<Row<'_>> = Vec::new();
        let mut by_id: BTreeMap<u32, usize> = BTreeMap::new();

        for item in &self.items {
            match item.row_group {
                Some(id) => match by_id.get(&id) {
                    Some(&slot) => rows[slot].items.push(item),
                    None => {
                        by_id.insert(id, rows.len());
                        rows.push(Row {
                            row_group: Some(id),
                            items: vec![item],
                        });
                    }
                },
                None => rows.push(Row {
                    row_group: None,
                    items: vec![item],
                }),
            }
        }

        for row in &mut rows {
            row.items
                .sort_by(|a, b| a.bbox.left().total_cmp(&b.bbox.left()));
        }
        rows.sort_by(|a, b| a.top().total_cmp(&b.top()));
        rows
    }

    /// Inferred label/value pairs, top-to-bottom then left-to-right by label.
    pub fn form_fields(&self) -> Vec<FormField<'_>> {
        let mut fields: Vec<FormField<'_>> = self
            .fields
            .iter()
            .map(|&(label, value)| FormField {
                label: &self.items[label],
                value: &self.items[value],
            })
            .collect();
        fields.sort_by(|a, b| {
            let (a, b) = (a.label.bbox, b.label.bbox);
            a.top().total_cmp(&b.top()).then(a.left().total_cmp(&b.left()))
        });
        fields
    }

    /// Item, row and role counts for this page.
    pub fn stats(&self) -> LayoutStats {
        let total_rows = self.rows().len();
        let count = |pred: fn(&ContentItem) -> bool| self.items.iter().filter(|i| pred(i)).count();
        LayoutStats {
            total_items: self.items.len(),
            total_rows,
            label_count: count(ContentItem::is_form_label),
            value_count: count(ContentItem::is_form_value),
            header_count: count(ContentItem::is_header),
            avg_items_per_row: if total_rows == 0 {
                0.0
            } else {
                self.items.len() as f64 / total_rows as f64
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemType;
    use crate::placer::GreedyPlacer;

    fn add(page: &mut PageLayout, content: &str, rect: Rect) -> ContentItem {
        page.add_item(
            ContentItem::text(content, page.page_number(), rect),
            &LayoutOptions::default(),
            &GreedyPlacer,
        )
    }

    #[test]
    fn test_empty_page() {
        let page = PageLayout::new(1);
        assert!(page.is_empty());
        assert_eq!(page.max_row_id(), 0);
        assert!(page.rows().is_empty());
        assert_eq!(page.stats(), LayoutStats::default());
    }

    #[test]
    fn test_first_item_opens_row_one() {
        let mut page = PageLayout::new(1);
        let item = add(&mut page, "hello", Rect::new(0.0, 0.0, 50.0, 10.0));
        assert_eq!(item.row_group(), Some(1));
        assert_eq!(page.max_row_id(), 1);
    }

    #[test]
    fn test_items_on_same_line_share_row() {
        let mut page = PageLayout::new(1);
        let a = add(&mut page, "a", Rect::new(0.0, 100.0, 50.0, 112.0));
        let b = add(&mut page, "b", Rect::new(80.0, 103.0, 130.0, 115.0));
        assert_eq!(a.row_group(), b.row_group());
    }

    #[test]
    fn test_distant_items_get_fresh_rows() {
        let mut page = PageLayout::new(1);
        let a = add(&mut page, "a", Rect::new(0.0, 0.0, 50.0, 10.0));
        let b = add(&mut page, "b", Rect::new(0.0, 100.0, 50.0, 110.0));
        let c = add(&mut page, "c", Rect::new(0.0, 200.0, 50.0, 210.0));
        assert_eq!(a.row_group(), Some(1));
        assert_eq!(b.row_group(), Some(2));
        assert_eq!(c.row_group(), Some(3));
        assert_eq!(page.max_row_id(), 3);
    }

    #[test]
    fn test_snap_applies_before_placement() {
        let mut page = PageLayout::new(1);
        let item = add(&mut page, "a", Rect::new(0.0, 11.0, 50.0, 21.0));
        assert_eq!(item.bbox(), Rect::new(0.0, 10.0, 50.0, 20.0));
    }

    #[test]
    fn test_item_retagged_to_page() {
        let mut page = PageLayout::new(4);
        let item = page.add_item(
            ContentItem::text("x", 9, Rect::new(0.0, 0.0, 5.0, 5.0)),
            &LayoutOptions::default(),
            &GreedyPlacer,
        );
        assert_eq!(item.page_number(), 4);
    }

    #[test]
    fn test_label_then_value() {
        let mut page = PageLayout::new(1);
        let label = add(&mut page, "Name:", Rect::new(0.0, 0.0, 60.0, 20.0));
        let value = add(&mut page, "Jane Doe", Rect::new(70.0, 0.0, 200.0, 20.0));
        assert!(label.is_form_label());
        assert!(value.is_form_value());
        assert!(page.items()[0].is_form_label());
        assert!(page.items()[1].is_form_value());
        assert_eq!(page.form_fields().len(), 1);
    }

    #[test]
    fn test_value_then_label() {
        let mut page = PageLayout::new(1);
        add(&mut page, "Jane Doe", Rect::new(70.0, 0.0, 200.0, 20.0));
        let label = add(&mut page, "Name:", Rect::new(0.0, 0.0, 60.0, 20.0));
        assert!(label.is_form_label());
        assert!(page.items()[0].is_form_value());
        let fields = page.form_fields();
        assert_eq!(fields[0].label.content(), "Name:");
        assert_eq!(fields[0].value.content(), "Jane Doe");
    }

    #[test]
    fn test_label_picks_nearest_value() {
        let mut page = PageLayout::new(1);
        add(&mut page, "far", Rect::new(300.0, 0.0, 400.0, 20.0));
        add(&mut page, "near", Rect::new(100.0, 0.0, 200.0, 20.0));
        add(&mut page, "Label:", Rect::new(0.0, 0.0, 60.0, 20.0));
        assert!(!page.items()[0].is_form_value());
        assert!(page.items()[1].is_form_value());
    }

    #[test]
    fn test_value_is_claimed_once() {
        let mut page = PageLayout::new(1);
        add(&mut page, "A:", Rect::new(0.0, 0.0, 40.0, 20.0));
        add(&mut page, "B:", Rect::new(50.0, 0.0, 90.0, 20.0));
        add(&mut page, "value", Rect::new(100.0, 0.0, 200.0, 20.0));
        let fields = page.form_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].label.content(), "B:");
        assert!(!page.items()[1].is_form_value());
    }

    fn field_pairs(page: &PageLayout) -> Vec<(String, String)> {
        page.form_fields()
            .iter()
            .map(|f| (f.label.content().to_string(), f.value.content().to_string()))
            .collect()
    }

    #[test]
    fn test_pairing_ignores_insertion_order() {
        let a = ("A:", Rect::new(0.0, 0.0, 40.0, 20.0));
        let b = ("B:", Rect::new(50.0, 0.0, 90.0, 20.0));
        let x = ("x", Rect::new(100.0, 0.0, 150.0, 20.0));
        let orders = [
            [a, b, x],
            [a, x, b],
            [b, a, x],
            [b, x, a],
            [x, a, b],
            [x, b, a],
        ];

        for order in orders {
            let mut page = PageLayout::new(1);
            for (content, rect) in order {
                add(&mut page, content, rect);
            }
            let names: Vec<&str> = order.iter().map(|(c, _)| *c).collect();
            assert_eq!(
                field_pairs(&page),
                vec![("B:".to_string(), "x".to_string())],
                "order {names:?}"
            );
        }
    }

    #[test]
    fn test_closer_item_takes_over_value_role() {
        let mut page = PageLayout::new(1);
        add(&mut page, "A:", Rect::new(0.0, 0.0, 40.0, 20.0));
        add(&mut page, "x", Rect::new(100.0, 0.0, 150.0, 20.0));
        assert!(page.items()[1].is_form_value());

        let y = add(&mut page, "y", Rect::new(50.0, 0.0, 90.0, 20.0));
        assert!(y.is_form_value());
        assert!(!page.items()[1].is_form_value());
        assert_eq!(field_pairs(&page), vec![("A:".to_string(), "y".to_string())]);
    }

    #[test]
    fn test_displaced_label_moves_to_next_value() {
        let mut page = PageLayout::new(1);
        add(&mut page, "A:", Rect::new(0.0, 0.0, 40.0, 20.0));
        add(&mut page, "x", Rect::new(100.0, 0.0, 150.0, 20.0));
        add(&mut page, "y", Rect::new(160.0, 0.0, 200.0, 20.0));
        add(&mut page, "B:", Rect::new(50.0, 0.0, 90.0, 20.0));
        assert_eq!(
            field_pairs(&page),
            vec![
                ("A:".to_string(), "y".to_string()),
                ("B:".to_string(), "x".to_string()),
            ]
        );
        assert_eq!(page.stats().value_count, 2);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "invalid options")]
    fn test_invalid_options_rejected_in_debug() {
        let mut page = PageLayout::new(1);
        page.add_item(
            ContentItem::text("a", 1, Rect::new(0.0, 0.0, 10.0, 10.0)),
            &LayoutOptions::new(-5.0, 10.0),
            &GreedyPlacer,
        );
    }

    #[test]
    fn test_label_does_not_become_value() {
        let mut page = PageLayout::new(1);
        add(&mut page, "First:", Rect::new(0.0, 0.0, 60.0, 20.0));
        let second = add(&mut page, "Second:", Rect::new(100.0, 0.0, 160.0, 20.0));
        assert!(second.is_form_label());
        assert!(!second.is_form_value());
        assert!(page.form_fields().is_empty());
    }

    #[test]
    fn test_plain_text_is_not_a_form() {
        let mut page = PageLayout::new(1);
        let a = add(&mut page, "Paragraph text.", Rect::new(0.0, 0.0, 60.0, 20.0));
        let b = add(&mut page, "more text", Rect::new(70.0, 0.0, 200.0, 20.0));
        assert!(!a.is_form_label() && !a.is_form_value());
        assert!(!b.is_form_label() && !b.is_form_value());
    }

    #[test]
    fn test_value_in_other_row_not_linked() {
        let mut page = PageLayout::new(1);
        add(&mut page, "Name:", Rect::new(0.0, 0.0, 60.0, 20.0));
        let value = add(&mut page, "Jane", Rect::new(70.0, 100.0, 200.0, 120.0));
        assert!(!value.is_form_value());
    }

    #[test]
    fn test_rows_sorted_top_then_left() {
        let mut page = PageLayout::new(1);
        add(&mut page, "bottom", Rect::new(0.0, 100.0, 50.0, 110.0));
        add(&mut page, "top-right", Rect::new(100.0, 0.0, 150.0, 10.0));
        add(&mut page, "top-left", Rect::new(0.0, 0.0, 50.0, 10.0));

        let rows = page.rows();
        assert_eq!(rows.len(), 2);
        let texts: Vec<Vec<&str>> = rows
            .iter()
            .map(|r| r.items.iter().map(|i| i.content()).collect())
            .collect();
        assert_eq!(texts, vec![vec!["top-left", "top-right"], vec!["bottom"]]);
        assert_eq!(rows[0].bbox(), Some(Rect::new(0.0, 0.0, 150.0, 10.0)));
    }

    #[test]
    fn test_stats_counts_roles() {
        let mut page = PageLayout::new(1);
        page.add_item(
            ContentItem::new("Title", ItemType::Heading, 1, Rect::new(0.0, 0.0, 200.0, 30.0)),
            &LayoutOptions::default(),
            &GreedyPlacer,
        );
        add(&mut page, "Date:", Rect::new(0.0, 50.0, 60.0, 70.0));
        add(&mut page, "2024-01-01", Rect::new(70.0, 50.0, 200.0, 70.0));

        let stats = page.stats();
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.total_rows, 2);
        assert_eq!(stats.label_count, 1);
        assert_eq!(stats.value_count, 1);
        assert_eq!(stats.header_count, 1);
        assert_eq!(stats.avg_items_per_row, 1.5);
    }
}
