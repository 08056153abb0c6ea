//! Collision-free placement of new items among already placed ones.
//!
//! [`Placer`] is the seam between geometry resolution and the rest of the
//! engine: row grouping and form inference only see the rectangle a placer
//! returns, so a smarter solver can replace [`GreedyPlacer`] without touching
//! them.

use tracing::debug;

use crate::geometry::Rect;
use crate::item::ContentItem;
use crate::options::LayoutOptions;

/// Strategy that moves a candidate rectangle clear of placed items.
pub trait Placer {
    /// Return the final position for `candidate` given the items already on
    /// the page, in their insertion order. Placed items are never moved.
    fn place(&self, candidate: Rect, placed: &[ContentItem], options: &LayoutOptions) -> Rect;
}

/// Insertion-order, first-match-wins overlap resolution.
///
/// Each pass scans placed items in order and resolves the first collision:
/// - on the same line (vertical overlap above `same_line_ratio`), push right
///   to `blocker.right + min_spacing`, unless that lands on an item the
///   candidate did not already touch, in which case keep the original `left`
///   and drop below the blocker instead;
/// - otherwise drop below the blocker, to `blocker.bottom + grid_size`.
///
/// Passes repeat until one finds no collision. A resolution leaves the
/// candidate strictly past its blocker on one axis and positions only grow,
/// so each placed item blocks at most once.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPlacer;

impl Placer for GreedyPlacer {
    fn place(&self, candidate: Rect, placed: &[ContentItem], options: &LayoutOptions) -> Rect {
        let tolerance = options.overlap_tolerance;
        let mut rect = candidate;

        for _ in 0..=placed.len() {
            let Some((index, blocker)) = placed
                .iter()
                .map(ContentItem::bbox)
                .enumerate()
                .find(|(_, bbox)| rect.overlaps(bbox, tolerance))
            else {
                return rect;
            };

            let below = rect.moved_to(rect.left(), blocker.bottom() + options.grid_size);

            if rect.vertical_overlap(&blocker) > options.same_line_ratio {
                let beside = rect.moved_to(blocker.right() + options.min_spacing, rect.top());
                let lands_on_new_item = placed.iter().enumerate().any(|(i, other)| {
                    i != index
                        && beside.overlaps(&other.bbox, tolerance)
                        && !rect.overlaps(&other.bbox, tolerance)
                });
                if lands_on_new_item {
                    debug!(blocker = index, "horizontal shift collides, dropping below");
                    rect = below;
                } else {
                    debug!(blocker = index, left = beside.left(), "shifted right");
                    rect = beside;
                }
            } else {
                debug!(blocker = index, top = below.top(), "shifted down");
                rect = below;
            }
        }

        rect
    }
}

/// Snap `rect` so its top sits on the nearest multiple of `grid_size`.
///
/// The snap is soft: it only applies when the move is shorter than half a
/// grid unit, and the height is kept.
pub fn snap_to_grid(rect: Rect, grid_size: f64) -> Rect {
    if grid_size <= 0.0 {
        return rect;
    }
    let snapped = (rect.top() / grid_size).round() * grid_size;
    let delta = snapped - rect.top();
    if delta.abs() < grid_size / 2.0 {
        rect.translate(0.0, delta)
    } else {
        rect
    }
}
