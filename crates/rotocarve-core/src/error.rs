//! Error handling for Rotocarve core
//!
//! The geometry and angle algorithms degrade silently on malformed input,
//! so errors only surface where geometry is validated at construction.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a geometric value is rejected at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A coordinate was NaN or infinite
    #[error("Non-finite value for {name}: {value}")]
    NonFinite {
        /// The name of the offending value.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// A polygon had too few distinct points to form a loop
    #[error("Polygon needs at least {min} points, got {actual}")]
    TooFewPoints {
        /// The minimum number of points required.
        min: usize,
        /// The number of points supplied.
        actual: usize,
    },
}
