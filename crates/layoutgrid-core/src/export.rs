//! Flat per-item records for tabular exporters.

use crate::item::ContentItem;

/// One placed item flattened into scalar columns.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRecord {
    pub page: u32,
    pub content: String,
    pub item_type: String,
    pub level: u32,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
    pub row_group: Option<u32>,
    pub is_form_label: bool,
    pub is_form_value: bool,
}

impl ItemRecord {
    /// Column names, in field order.
    pub const COLUMNS: [&'static str; 13] = [
        "page",
        "content",
        "item_type",
        "level",
        "left",
        "top",
        "right",
        "bottom",
        "width",
        "height",
        "row_group",
        "is_form_label",
        "is_form_value",
    ];

    /// Header line for [`to_csv_row`](Self::to_csv_row), built from
    /// [`COLUMNS`](Self::COLUMNS).
    pub fn csv_header() -> String {
        Self::COLUMNS.join(",")
    }

    /// Render the record as one CSV line (no trailing newline).
    ///
    /// Coordinates use two decimals; an unassigned row group is an empty
    /// field.
    pub fn to_csv_row(&self) -> String {
        let row_group = self.row_group.map(|r| r.to_string()).unwrap_or_default();
        format!(
            "{},{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{},{},{}",
            self.page,
            csv_escape(&self.content),
            csv_escape(&self.item_type),
            self.level,
            self.left,
            self.top,
            self.right,
            self.bottom,
            self.width,
            self.height,
            row_group,
            self.is_form_label,
            self.is_form_value,
        )
    }
}

/// Quote a CSV field if it contains a comma, quote or line break.
pub fn csv_escape(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

impl From<&ContentItem> for ItemRecord {
    fn from(item: &ContentItem) -> Self {
        let bbox = item.bbox();
        Self {
            page: item.page_number(),
            content: item.content().to_string(),
            item_type: item.item_type().to_string(),
            level: item.level(),
            left: bbox.left(),
            top: bbox.top(),
            right: bbox.right(),
            bottom: bbox.bottom(),
            width: bbox.width(),
            height: bbox.height(),
            row_group: item.row_group(),
            is_form_label: item.is_form_label(),
            is_form_value: item.is_form_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LayoutEngine;
    use crate::geometry::Rect;
    use crate::item::ItemType;

    #[test]
    fn test_record_from_placed_item() {
        let mut engine = LayoutEngine::new();
        engine.add_item(ContentItem::text("Name:", 2, Rect::new(0.0, 0.0, 60.0, 20.0)));
        engine.add_item(
            ContentItem::new("Jane", ItemType::Other("field".into()), 2, Rect::new(70.0, 0.0, 200.0, 20.0))
                .with_level(3),
        );

        let records: Vec<ItemRecord> = engine
            .get_all_items(Some(2))
            .into_iter()
            .map(ItemRecord::from)
            .collect();

        assert_eq!(records[0].content, "Name:");
        assert!(records[0].is_form_label);
        assert_eq!(records[1].item_type, "field");
        assert_eq!(records[1].level, 3);
        assert_eq!(records[1].width, 130.0);
        assert_eq!(records[1].height, 20.0);
        assert_eq!(records[1].row_group, Some(1));
        assert!(records[1].is_form_value);
    }

    #[test]
    fn test_columns_match_field_count() {
        assert_eq!(ItemRecord::COLUMNS.len(), 13);
        assert_eq!(ItemRecord::COLUMNS[0], "page");
        assert_eq!(ItemRecord::COLUMNS[12], "is_form_value");
        assert_eq!(
            ItemRecord::csv_header(),
            "page,content,item_type,level,left,top,right,bottom,width,height,row_group,is_form_label,is_form_value"
        );
    }

    #[test]
    fn test_csv_row() {
        let mut engine = LayoutEngine::new();
        let placed = engine.add_item(ContentItem::text(
            "Total, net",
            1,
            Rect::new(0.0, 0.0, 50.5, 20.0),
        ));
        let row = ItemRecord::from(&placed).to_csv_row();
        assert_eq!(
            row,
            "1,\"Total, net\",text,0,0.00,0.00,50.50,20.00,50.50,20.00,1,false,false"
        );
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }
}
