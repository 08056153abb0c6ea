//! Content items: extracted blocks placed on a page.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::geometry::Rect;

/// Semantic type of an extracted block.
///
/// The set is open: unknown tags round-trip through [`ItemType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum ItemType {
    /// Running text.
    Text,
    /// A heading; its depth lives in [`ContentItem::level`].
    Heading,
    /// A list entry.
    ListItem,
    /// A table block.
    Table,
    /// An image or figure.
    Image,
    /// Reserved space with no content yet.
    Placeholder,
    /// Any other tag supplied by the extractor.
    Other(String),
}

impl ItemType {
    /// Returns the string tag for this item type.
    pub fn as_str(&self) -> &str {
        match self {
            ItemType::Text => "text",
            ItemType::Heading => "heading",
            ItemType::ListItem => "list_item",
            ItemType::Table => "table",
            ItemType::Image => "image",
            ItemType::Placeholder => "placeholder",
            ItemType::Other(tag) => tag,
        }
    }

    /// Whether items of this type count as page headers.
    pub fn is_heading(&self) -> bool {
        matches!(self, ItemType::Heading)
    }
}

impl FromStr for ItemType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "text" | "paragraph" => ItemType::Text,
            "heading" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => ItemType::Heading,
            "list_item" | "list-item" | "li" => ItemType::ListItem,
            "table" => ItemType::Table,
            "image" | "figure" => ItemType::Image,
            "placeholder" => ItemType::Placeholder,
            _ => ItemType::Other(s.to_string()),
        })
    }
}

impl From<String> for ItemType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<ItemType> for String {
    fn from(t: ItemType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font hints carried through from the extractor untouched.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    /// Font family name, if known.
    pub font_family: Option<String>,
    /// Font size in points, if known.
    pub font_size: Option<f64>,
    /// Bold weight.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bold: bool,
    /// Italic style.
    #[cfg_attr(feature = "serde", serde(default))]
    pub italic: bool,
}

/// A block of extracted content and its position on a page.
///
/// Items are built by the extraction side and handed to the layout engine by
/// value. From then on the engine alone moves the bounding box and assigns
/// the row group and form roles; callers only get clones or shared borrows,
/// so those fields have no public setters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentItem {
    pub(crate) bbox: Rect,
    content: String,
    item_type: ItemType,
    #[cfg_attr(feature = "serde", serde(default))]
    level: u32,
    page_number: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) row_group: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) is_form_label: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) is_form_value: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    style: Option<TextStyle>,
    #[cfg_attr(feature = "serde", serde(default))]
    metadata: BTreeMap<String, String>,
}

impl ContentItem {
    /// Create an unplaced item. `bbox` must already be in top-left-origin
    /// coordinates (see [`Rect::from_bottom_left`]).
    pub fn new(
        content: impl Into<String>,
        item_type: ItemType,
        page_number: u32,
        bbox: Rect,
    ) -> Self {
        Self {
            bbox,
            content: content.into(),
            item_type,
            level: 0,
            page_number,
            row_group: None,
            is_form_label: false,
            is_form_value: false,
            style: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Shorthand for a [`ItemType::Text`] item.
    pub fn text(content: impl Into<String>, page_number: u32, bbox: Rect) -> Self {
        Self::new(content, ItemType::Text, page_number, bbox)
    }

    /// Set the nesting or heading depth.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Attach a free-form metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn item_type(&self) -> &ItemType {
        &self.item_type
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Row identifier shared by items on the same visual line.
    /// `None` until the item has been placed.
    pub fn row_group(&self) -> Option<u32> {
        self.row_group
    }

    pub fn is_form_label(&self) -> bool {
        self.is_form_label
    }

    pub fn is_form_value(&self) -> bool {
        self.is_form_value
    }

    pub fn is_header(&self) -> bool {
        self.item_type.is_heading()
    }

    pub fn style(&self) -> Option<&TextStyle> {
        self.style.as_ref()
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub(crate) fn on_page(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Whether the content reads like a form label: short and colon-terminated.
    pub(crate) fn looks_like_label(&self, max_len: usize) -> bool {
        let trimmed = self.content.trim();
        trimmed.ends_with(':') && trimmed.chars().count() < max_len
    }
}
