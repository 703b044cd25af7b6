//! Error types for flyby-core.

use thiserror::Error;

/// Errors raised while validating shared configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A quadrant weight is negative or not finite.
    #[error("invalid weight for quadrant {index}: {value}")]
    InvalidWeight {
        /// Quadrant index (0 = top-left).
        index: usize,
        /// Offending weight.
        value: f32,
    },

    /// All quadrant weights are zero.
    #[error("quadrant weights sum to zero")]
    ZeroWeights,

    /// A random span is inverted or not finite.
    #[error("invalid span `{name}`: {min}..{max}")]
    InvalidSpan {
        /// Name of the configured value.
        name: &'static str,
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },
}
