//! Error types for layoutgrid.
//!
//! Placement and queries are total and never fail. The only fallible step
//! is building an engine from caller-supplied [`LayoutOptions`], which is
//! reported as a [`LayoutError`].
//!
//! [`LayoutOptions`]: crate::LayoutOptions

use thiserror::Error;

/// Errors raised while configuring the layout engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A tunable parameter is out of its accepted range.
    #[error("invalid layout option {name} = {value}: {reason}")]
    InvalidOption {
        /// Name of the option (e.g., "grid_size").
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// What the value must satisfy.
        reason: &'static str,
    },
}

/// Convenience Result type alias for [`LayoutError`].
pub type Result<T> = std::result::Result<T, LayoutError>;
