//! layoutgrid-core: Spatial layout engine for extracted document blocks.
//!
//! This crate provides the geometry type ([`Rect`]), the placed content
//! record ([`ContentItem`]) and the [`LayoutEngine`], which places items one
//! at a time: it snaps them to a grid, pushes them clear of items already on
//! the page, groups them into rows and infers form label/value pairs.
//! Sizes are taken as given; nothing here measures glyphs.

pub mod engine;
pub mod error;
pub mod export;
pub mod geometry;
pub mod item;
pub mod options;
pub mod page;
pub mod placer;

pub use engine::LayoutEngine;
pub use error::{LayoutError, Result};
pub use export::ItemRecord;
pub use geometry::Rect;
pub use item::{ContentItem, ItemType, TextStyle};
pub use options::LayoutOptions;
pub use page::{FormField, LayoutStats, PageLayout, Row};
pub use placer::{GreedyPlacer, Placer, snap_to_grid};
