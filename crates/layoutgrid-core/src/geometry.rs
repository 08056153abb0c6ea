/// Axis-aligned rectangle with top-left origin coordinate system.
///
/// Coordinates are page-local points:
/// - `left`: left edge
/// - `top`: top edge (distance from top of page)
/// - `right`: right edge
/// - `bottom`: bottom edge (distance from top of page)
///
/// A `Rect` always satisfies `left <= right` and `top <= bottom`. Reversed
/// bounds are swapped on construction instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RectBounds")
)]
pub struct Rect {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

/// Raw bounds as they appear on the wire, before normalization.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RectBounds {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

#[cfg(feature = "serde")]
impl From<RectBounds> for Rect {
    fn from(b: RectBounds) -> Self {
        Rect::new(b.left, b.top, b.right, b.bottom)
    }
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// Build a rectangle from bottom-left-origin coordinates.
    ///
    /// `top` and `bottom` are measured upward from the bottom of a page of
    /// height `page_height`; both are flipped with `page_height - value`.
    /// Apply this once, when a block enters the system.
    pub fn from_bottom_left(
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
        page_height: f64,
    ) -> Self {
        Self::new(left, page_height - top, right, page_height - bottom)
    }

    /// Inverse of [`Rect::from_bottom_left`]: `(left, top, right, bottom)` in
    /// bottom-left-origin coordinates.
    pub fn to_bottom_left(&self, page_height: f64) -> (f64, f64, f64, f64) {
        (
            self.left,
            page_height - self.top,
            self.right,
            page_height - self.bottom,
        )
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Compute the union of two rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Shift the rectangle by `(dx, dy)`, preserving its size.
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Move the top-left corner to `(left, top)`, preserving the size.
    pub fn moved_to(&self, left: f64, top: f64) -> Rect {
        Rect {
            left,
            top,
            right: left + self.width(),
            bottom: top + self.height(),
        }
    }

    /// Scale every coordinate by `scale` (points to screen pixels).
    pub fn to_screen(&self, scale: f64) -> Rect {
        Rect::new(
            self.left * scale,
            self.top * scale,
            self.right * scale,
            self.bottom * scale,
        )
    }

    /// Whether the two rectangles overlap, allowing for `tolerance`.
    ///
    /// The rectangles are apart when the gap between facing edges exceeds
    /// `tolerance` on either axis. Intersecting rectangles have a negative
    /// gap, so a negative tolerance lets them touch or graze each other by up
    /// to `-tolerance` without counting as an overlap.
    pub fn overlaps(&self, other: &Rect, tolerance: f64) -> bool {
        !(self.right + tolerance < other.left
            || other.right + tolerance < self.left
            || self.bottom + tolerance < other.top
            || other.bottom + tolerance < self.top)
    }

    /// Shared vertical extent as a fraction of the shorter rectangle's height.
    ///
    /// Returns a value in `[0, 1]`: 0 when the rectangles share no vertical
    /// extent, 1 when one fully covers the other vertically.
    pub fn vertical_overlap(&self, other: &Rect) -> f64 {
        overlap_ratio(self.top, self.bottom, other.top, other.bottom)
    }

    /// Shared horizontal extent as a fraction of the narrower rectangle's width.
    pub fn horizontal_overlap(&self, other: &Rect) -> f64 {
        overlap_ratio(self.left, self.right, other.left, other.right)
    }
}

fn overlap_ratio(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    let shared = a1.min(b1) - a0.max(b0);
    let smaller = (a1 - a0).min(b1 - b0);
    if shared <= 0.0 || smaller <= 0.0 {
        return 0.0;
    }
    (shared / smaller).min(1.0)
}
