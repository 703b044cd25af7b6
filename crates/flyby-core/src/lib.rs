//! Shared building blocks for the flyby background animation.
//!
//! Provides the pieces every other flyby crate leans on:
//! - [`RandomSource`] - injected randomness, with seeded, system and replay sources
//! - [`distributed_angle`] - quadrant-weighted flight directions
//! - [`SocialKind`] / [`Glyph`] - the fixed content sets elements are drawn from
//! - [`Viewport`] / [`Span`] - small value types for sizes and random ranges
//!
//! # Example
//!
//! ```
//! use flyby_core::{FlybyRng, QuadrantWeights, Quadrant, distributed_angle};
//!
//! let mut rng = FlybyRng::new(7);
//! let angle = distributed_angle(&mut rng, &QuadrantWeights::default());
//! assert!((0.0..std::f32::consts::TAU).contains(&angle));
//! let _quadrant = Quadrant::containing(angle);
//! ```

mod angle;
mod content;
mod error;
mod rng;

pub use angle::{Quadrant, QuadrantWeights, direction_of, distributed_angle, sample_quadrant};
pub use content::{ElementContent, Glyph, SocialKind};
pub use error::CoreError;
pub use rng::{FlybyRng, RandomSource, SequenceRandom, SystemRandom};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size of the drawing area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl Viewport {
    /// Creates a viewport of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the center point.
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Returns the longer side.
    pub fn max_side(&self) -> f32 {
        self.width.max(self.height)
    }
}

/// Supplies the current viewport size.
///
/// Queried once per spawned element; an element keeps the size it was born with.
pub trait ViewportProvider {
    /// Returns the current viewport.
    fn viewport(&self) -> Viewport;
}

impl ViewportProvider for Viewport {
    fn viewport(&self) -> Viewport {
        *self
    }
}

/// A closed range of `f32` values sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl Span {
    /// Creates a span from `min` to `max`.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A span that always yields `value`.
    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Draws a value from the span.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> f32 {
        rng.range(self.min, self.max)
    }

    /// Returns true if `value` lies within the span.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Checks that both bounds are finite and ordered.
    pub fn validate(&self, name: &'static str) -> Result<(), CoreError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(CoreError::InvalidSpan {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}
