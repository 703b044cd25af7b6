//! Error types for flyby-motion.

use flyby_core::CoreError;
use thiserror::Error;

/// Errors reported by [`FlightPreset::validate`](crate::FlightPreset::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    /// A shared value (span, weights) is invalid.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Easing exponent must be greater than one so flights accelerate.
    #[error("easing exponent must be > 1, got {0}")]
    EasingNotSuperLinear(f32),

    /// A value that must be strictly positive is not.
    #[error("`{name}` must be positive, got {value}")]
    NonPositive {
        /// Name of the configured value.
        name: &'static str,
        /// Offending value.
        value: f32,
    },

    /// A value that must be non-negative is negative or not finite.
    #[error("`{name}` must be non-negative, got {value}")]
    Negative {
        /// Name of the configured value.
        name: &'static str,
        /// Offending value.
        value: f32,
    },

    /// Opacity bounds must lie inside [0, 1].
    #[error("`{name}` must lie in [0, 1], got {value}")]
    OutsideUnit {
        /// Name of the configured value.
        name: &'static str,
        /// Offending value.
        value: f32,
    },

    /// The far depth must be behind the screen plane.
    #[error("far depth must be negative, got {0}")]
    FarDepthNotBehindScreen(f32),

    /// A flight would complete before it starts moving.
    #[error("completion depth {completion} is not past the start depth {start}")]
    CompletionBeforeStart {
        /// Configured completion depth.
        completion: f32,
        /// Largest start depth.
        start: f32,
    },
}
