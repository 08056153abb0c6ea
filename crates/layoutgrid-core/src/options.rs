use crate::error::{LayoutError, Result};

/// Tunable parameters of the layout engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    /// Grid unit (in points) that item tops are snapped to. Also the gap
    /// left below an item when another is pushed underneath it. Default: 5.0.
    pub grid_size: f64,
    /// Horizontal gap (in points) left after an item when another item on
    /// the same line is pushed to its right. Default: 10.0.
    pub min_spacing: f64,
    /// Tolerance passed to [`Rect::overlaps`] when checking placed items
    /// against each other. Negative values allow shallow contact. Default: -2.0.
    ///
    /// [`Rect::overlaps`]: crate::Rect::overlaps
    pub overlap_tolerance: f64,
    /// Vertical overlap ratio above which two colliding items are treated as
    /// sitting on the same line, so the newcomer moves right instead of down.
    /// Default: 0.7.
    pub same_line_ratio: f64,
    /// Maximum distance between vertical centers for two items to share a
    /// row. `None` means twice the grid size.
    pub row_tolerance: Option<f64>,
    /// Labels must be shorter than this many characters (after trimming).
    /// Default: 50.
    pub max_label_len: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            grid_size: 5.0,
            min_spacing: 10.0,
            overlap_tolerance: -2.0,
            same_line_ratio: 0.7,
            row_tolerance: None,
            max_label_len: 50,
        }
    }
}

impl LayoutOptions {
    /// Options with the given grid size and spacing, other fields default.
    pub fn new(grid_size: f64, min_spacing: f64) -> Self {
        Self {
            grid_size,
            min_spacing,
            ..Self::default()
        }
    }

    /// Row clustering tolerance in effect.
    pub fn effective_row_tolerance(&self) -> f64 {
        self.row_tolerance.unwrap_or(2.0 * self.grid_size)
    }

    /// Check every parameter against its accepted range.
    ///
    /// Both displacement steps (`grid_size` below, `min_spacing` to the
    /// right) must clear `overlap_tolerance`, otherwise a pushed item could
    /// still collide with the item it was pushed away from.
    pub fn validate(&self) -> Result<()> {
        if !self.grid_size.is_finite() || self.grid_size <= 0.0 {
            return Err(invalid(
                "grid_size",
                self.grid_size,
                "must be finite and greater than zero",
            ));
        }
        if !self.min_spacing.is_finite() || self.min_spacing < 0.0 {
            return Err(invalid(
                "min_spacing",
                self.min_spacing,
                "must be finite and not negative",
            ));
        }
        if !self.overlap_tolerance.is_finite()
            || self.overlap_tolerance >= self.min_spacing
            || self.overlap_tolerance >= self.grid_size
        {
            return Err(invalid(
                "overlap_tolerance",
                self.overlap_tolerance,
                "must be finite and less than both min_spacing and grid_size",
            ));
        }
        if !(0.0..=1.0).contains(&self.same_line_ratio) {
            return Err(invalid(
                "same_line_ratio",
                self.same_line_ratio,
                "must be between 0 and 1",
            ));
        }
        if let Some(tol) = self.row_tolerance {
            if !tol.is_finite() || tol < 0.0 {
                return Err(invalid(
                    "row_tolerance",
                    tol,
                    "must be finite and not negative",
                ));
            }
        }
        Ok(())
    }
}

fn invalid(name: &'static str, value: f64, reason: &'static str) -> LayoutError {
    LayoutError::InvalidOption {
        name,
        value,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_options_default() {
        let opts = LayoutOptions::default();
        assert_eq!(opts.grid_size, 5.0);
        assert_eq!(opts.min_spacing, 10.0);
        assert_eq!(opts.overlap_tolerance, -2.0);
        assert_eq!(opts.same_line_ratio, 0.7);
        assert_eq!(opts.effective_row_tolerance(), 10.0);
        assert_eq!(opts.max_label_len, 50);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_explicit_row_tolerance() {
        let opts = LayoutOptions {
            row_tolerance: Some(4.0),
            ..LayoutOptions::default()
        };
        assert_eq!(opts.effective_row_tolerance(), 4.0);
    }

    #[test]
    fn test_zero_grid_rejected() {
        let err = LayoutOptions::new(0.0, 10.0).validate().unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidOption {
                name: "grid_size",
                ..
            }
        ));
    }

    #[test]
    fn test_nan_spacing_rejected() {
        let err = LayoutOptions::new(5.0, f64::NAN).validate().unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidOption {
                name: "min_spacing",
                ..
            }
        ));
    }

    #[test]
    fn test_tolerance_must_stay_below_displacements() {
        let opts = LayoutOptions {
            min_spacing: 1.0,
            overlap_tolerance: 1.0,
            ..LayoutOptions::default()
        };
        assert!(matches!(
            opts.validate(),
            Err(LayoutError::InvalidOption {
                name: "overlap_tolerance",
                ..
            })
        ));
    }

    #[test]
    fn test_ratio_out_of_range_rejected() {
        let opts = LayoutOptions {
            same_line_ratio: 1.5,
            ..LayoutOptions::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_negative_row_tolerance_rejected() {
        let opts = LayoutOptions {
            row_tolerance: Some(-1.0),
            ..LayoutOptions::default()
        };
        assert!(opts.validate().is_err());
    }
}
