//! Reading extracted blocks from JSON.
//!
//! The CLI plays the extraction side of the pipeline: it accepts blocks in
//! either coordinate origin and normalizes them to top-left before they reach
//! the engine. This is the only place the bottom-left flip happens.

use std::collections::BTreeMap;
use std::fmt;

use layoutgrid_core::{ContentItem, ItemType, Rect, TextStyle};
use serde::Deserialize;

/// Vertical origin of the incoming coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    #[default]
    TopLeft,
    BottomLeft,
}

/// Bounds exactly as the extractor wrote them.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// One extracted block.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub content: String,
    #[serde(rename = "type", alias = "item_type", default = "default_type")]
    pub item_type: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default = "default_page", alias = "page_number")]
    pub page: u32,
    pub bbox: RawBox,
    /// Overrides the document-level origin for this block.
    #[serde(default)]
    pub origin: Option<Origin>,
    /// Overrides the document-level page height for this block.
    #[serde(default)]
    pub page_height: Option<f64>,
    #[serde(default)]
    pub style: Option<TextStyle>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

fn default_type() -> String {
    "text".to_string()
}

fn default_page() -> u32 {
    1
}

/// Input file: either a bare list of blocks or a document with defaults.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InputDocument {
    Blocks(Vec<RawBlock>),
    Document {
        #[serde(default)]
        origin: Origin,
        #[serde(default)]
        page_height: Option<f64>,
        blocks: Vec<RawBlock>,
    },
}

/// A block that cannot be normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct InputError {
    pub index: usize,
    pub message: String,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block {}: {}", self.index, self.message)
    }
}

impl std::error::Error for InputError {}

impl InputDocument {
    /// Normalize every block into a top-left-origin [`ContentItem`], in
    /// document order.
    pub fn into_items(self) -> Result<Vec<ContentItem>, InputError> {
        let (origin, page_height, blocks) = match self {
            InputDocument::Blocks(blocks) => (Origin::TopLeft, None, blocks),
            InputDocument::Document {
                origin,
                page_height,
                blocks,
            } => (origin, page_height, blocks),
        };

        blocks
            .into_iter()
            .enumerate()
            .map(|(index, block)| block.into_item(index, origin, page_height))
            .collect()
    }
}

impl RawBlock {
    fn into_item(
        self,
        index: usize,
        default_origin: Origin,
        default_height: Option<f64>,
    ) -> Result<ContentItem, InputError> {
        let b = self.bbox;
        if ![b.left, b.top, b.right, b.bottom].iter().all(|v| v.is_finite()) {
            return Err(InputError {
                index,
                message: "bounding box coordinates must be finite".to_string(),
            });
        }

        let bbox = match self.origin.unwrap_or(default_origin) {
            Origin::TopLeft => Rect::new(b.left, b.top, b.right, b.bottom),
            Origin::BottomLeft => {
                let height = self.page_height.or(default_height).ok_or_else(|| InputError {
                    index,
                    message: "bottom-left coordinates need a page_height".to_string(),
                })?;
                Rect::from_bottom_left(b.left, b.top, b.right, b.bottom, height)
            }
        };

        let item_type: ItemType = self.item_type.into();
        let mut item = ContentItem::new(self.content, item_type, self.page, bbox)
            .with_level(self.level);
        if let Some(style) = self.style {
            item = item.with_style(style);
        }
        for (key, value) in self.metadata {
            item = item.with_metadata(key, value);
        }
        Ok(item)
    }
}
