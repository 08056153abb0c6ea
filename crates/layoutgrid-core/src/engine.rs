//! The layout engine: pages of placed items keyed by page number.

use std::collections::BTreeMap;

use tracing::info;

use crate::error::Result;
use crate::item::ContentItem;
use crate::options::LayoutOptions;
use crate::page::{FormField, LayoutStats, PageLayout, Row};
use crate::placer::{GreedyPlacer, Placer};

/// Places extracted items page by page and answers layout queries.
///
/// The engine is single-writer: `add_item` must see every earlier item of
/// the same page, so calls for one page have to be serialized. Queries only
/// borrow and never fail; unknown pages read as empty.
///
/// ```
/// use layoutgrid_core::{ContentItem, LayoutEngine, Rect};
///
/// let mut engine = LayoutEngine::new();
/// engine.add_item(ContentItem::text("Date:", 1, Rect::new(0.0, 0.0, 60.0, 20.0)));
/// let value = engine.add_item(ContentItem::text("2024-01-01", 1, Rect::new(70.0, 0.0, 200.0, 20.0)));
/// assert!(value.is_form_value());
/// assert_eq!(engine.analyze_layout(1).total_items, 2);
/// ```
#[derive(Debug, Clone)]
pub struct LayoutEngine<P = GreedyPlacer> {
    options: LayoutOptions,
    placer: P,
    pages: BTreeMap<u32, PageLayout>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    /// Engine with default options (grid 5, spacing 10) and the greedy placer.
    pub fn new() -> Self {
        Self {
            options: LayoutOptions::default(),
            placer: GreedyPlacer,
            pages: BTreeMap::new(),
        }
    }

    /// Engine with custom options and the greedy placer.
    pub fn with_options(options: LayoutOptions) -> Result<Self> {
        Self::with_placer(options, GreedyPlacer)
    }
}

impl<P: Placer> LayoutEngine<P> {
    /// Engine with custom options and placement strategy.
    pub fn with_placer(options: LayoutOptions, placer: P) -> Result<Self> {
        options.validate()?;
        info!(
            grid_size = options.grid_size,
            min_spacing = options.min_spacing,
            "layout engine configured"
        );
        Ok(Self {
            options,
            placer,
            pages: BTreeMap::new(),
        })
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Snap, place, group and classify `item`, append it to its page and
    /// return a snapshot of the placed item.
    pub fn add_item(&mut self, item: ContentItem) -> ContentItem {
        let page_number = item.page_number();
        self.pages
            .entry(page_number)
            .or_insert_with(|| PageLayout::new(page_number))
            .add_item(item, &self.options, &self.placer)
    }

    /// Add a page built elsewhere (e.g. on another thread), replacing any
    /// page with the same number. Returns the replaced page.
    pub fn insert_page(&mut self, page: PageLayout) -> Option<PageLayout> {
        self.pages.insert(page.page_number(), page)
    }

    pub fn page(&self, page_number: u32) -> Option<&PageLayout> {
        self.pages.get(&page_number)
    }

    /// Page numbers known to the engine, ascending.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.pages.keys().copied().collect()
    }

    /// Number of placed items across all pages.
    pub fn len(&self) -> usize {
        self.pages.values().map(PageLayout::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows of `page_number`, top-to-bottom, items left-to-right.
    pub fn get_rows(&self, page_number: u32) -> Vec<Row<'_>> {
        self.pages
            .get(&page_number)
            .map(PageLayout::rows)
            .unwrap_or_default()
    }

    /// Items of one page in insertion order, or of every page (ascending
    /// page number, each in insertion order) when `page_number` is `None`.
    pub fn get_all_items(&self, page_number: Option<u32>) -> Vec<&ContentItem> {
        match page_number {
            Some(n) => self
                .pages
                .get(&n)
                .map(|page| page.items().iter().collect())
                .unwrap_or_default(),
            None => self
                .pages
                .values()
                .flat_map(|page| page.items())
                .collect(),
        }
    }

    /// Counts of items, rows, labels, values and headers on a page.
    pub fn analyze_layout(&self, page_number: u32) -> LayoutStats {
        self.pages
            .get(&page_number)
            .map(PageLayout::stats)
            .unwrap_or_default()
    }

    /// Label/value pairs inferred on a page.
    pub fn get_form_fields(&self, page_number: u32) -> Vec<FormField<'_>> {
        self.pages
            .get(&page_number)
            .map(PageLayout::form_fields)
            .unwrap_or_default()
    }
}

#[cfg(feature = "parallel")]
impl<P: Placer + Sync> LayoutEngine<P> {
    /// Lay out many pages at once, one rayon task per page.
    ///
    /// Items are grouped by page number keeping their relative order, so each
    /// page ends up exactly as if its items had been added one by one.
    /// Resulting pages replace existing pages with the same number.
    pub fn layout_pages(&mut self, items: impl IntoIterator<Item = ContentItem>) {
        use rayon::prelude::*;

        let mut grouped: BTreeMap<u32, Vec<ContentItem>> = BTreeMap::new();
        for item in items {
            grouped.entry(item.page_number()).or_default().push(item);
        }

        let options = &self.options;
        let placer = &self.placer;
        let pages: Vec<PageLayout> = grouped
            .into_par_iter()
            .map(|(page_number, items)| {
                let mut page = PageLayout::new(page_number);
                for item in items {
                    page.add_item(item, options, placer);
                }
                page
            })
            .collect();

        for page in pages {
            self.insert_page(page);
        }
    }
}
