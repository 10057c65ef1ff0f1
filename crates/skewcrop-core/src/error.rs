//! Error types for input validation.
//!
//! Degenerate geometry is never an error: the solvers recover locally and keep
//! the last good value. These errors only cover inputs that make a computation
//! pass meaningless, such as a zero-sized viewport or a negative search budget.

use thiserror::Error;

/// Error types for engine configuration and per-pass inputs.
#[derive(Debug, Error, PartialEq)]
pub enum SkewError {
    /// A configuration field is out of its allowed range.
    #[error("Invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A size is zero, negative or non-finite.
    #[error("Invalid {what} size: {width}x{height}")]
    InvalidSize {
        what: &'static str,
        width: f64,
        height: f64,
    },

    /// The image frame has a non-finite origin or size.
    #[error("Invalid image frame")]
    InvalidFrame,

    /// A crop corner is NaN or infinite.
    #[error("Crop corner {index} is not finite")]
    NonFiniteCorner { index: usize },

    /// A zoom scale below the minimum zoom scale, or non-finite.
    #[error("Invalid zoom scale: {0}")]
    InvalidZoom(f64),

    /// Restored session state breaks one of its invariants.
    #[error("Invalid skew state: {field} ({reason})")]
    InvalidState {
        field: &'static str,
        reason: &'static str,
    },
}
