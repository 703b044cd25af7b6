//! Quadrant-weighted flight directions.
//!
//! Directions are angles in radians, mapped to a screen vector as
//! `(sin a, cos a)` with y pointing down. Each [`Quadrant`] is a 90° sector;
//! the default weights favour the two bottom sectors.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use crate::error::CoreError;
use crate::rng::RandomSource;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 90° sector of flight directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Quadrant {
    /// Sector centered on π.
    TopLeft,
    /// Sector centered on π/2.
    TopRight,
    /// Sector centered on 0, wrapping through 2π.
    BottomRight,
    /// Sector centered on 3π/2.
    BottomLeft,
}

impl Quadrant {
    /// All quadrants, in weight order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomRight,
        Quadrant::BottomLeft,
    ];

    /// Returns the position of this quadrant in [`Quadrant::ALL`].
    pub fn index(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomRight => 2,
            Quadrant::BottomLeft => 3,
        }
    }

    /// Returns the sector start angle. The sector spans `start..start + π/2`.
    pub fn start_angle(self) -> f32 {
        match self {
            Quadrant::TopLeft => 3.0 * FRAC_PI_4,
            Quadrant::TopRight => FRAC_PI_4,
            Quadrant::BottomRight => 7.0 * FRAC_PI_4,
            Quadrant::BottomLeft => 5.0 * FRAC_PI_4,
        }
    }

    /// Returns the sector as `(start, end)`; `end` may exceed 2π.
    pub fn angle_range(self) -> (f32, f32) {
        let start = self.start_angle();
        (start, start + FRAC_PI_2)
    }

    /// Draws a uniform angle inside this sector, wrapped into [0, 2π).
    pub fn sample_angle(self, rng: &mut dyn RandomSource) -> f32 {
        wrap_angle(self.start_angle() + rng.next_f32() * FRAC_PI_2)
    }

    /// Classifies an angle (any value, in radians) into its sector.
    pub fn containing(angle: f32) -> Quadrant {
        // an offset just below 2π can round up to exactly 2π; it stays in the last sector
        let offset = (angle - FRAC_PI_4).rem_euclid(TAU);
        match ((offset / FRAC_PI_2) as usize).min(3) {
            0 => Quadrant::TopRight,
            1 => Quadrant::TopLeft,
            2 => Quadrant::BottomLeft,
            _ => Quadrant::BottomRight,
        }
    }
}

fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Relative weights for picking a [`Quadrant`], stored normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[f32; 4]", into = "[f32; 4]"))]
pub struct QuadrantWeights {
    weights: [f32; 4],
}

impl Default for QuadrantWeights {
    fn default() -> Self {
        Self {
            weights: [0.2, 0.2, 0.3, 0.3],
        }
    }
}

impl QuadrantWeights {
    /// Creates weights in [`Quadrant::ALL`] order.
    ///
    /// Weights need not sum to one; they are normalized here unless they
    /// already do.
    pub fn new(weights: [f32; 4]) -> Result<Self, CoreError> {
        for (index, &value) in weights.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidWeight { index, value });
            }
        }
        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            return Err(CoreError::ZeroWeights);
        }
        if (total - 1.0).abs() <= 1e-6 {
            return Ok(Self { weights });
        }
        Ok(Self {
            weights: weights.map(|w| w / total),
        })
    }

    /// Equal weight for every quadrant.
    pub fn uniform() -> Self {
        Self {
            weights: [0.25; 4],
        }
    }

    /// Returns the normalized weight of a quadrant.
    pub fn weight(&self, quadrant: Quadrant) -> f32 {
        self.weights[quadrant.index()]
    }

    /// Returns all normalized weights.
    pub fn as_array(&self) -> [f32; 4] {
        self.weights
    }

    /// Maps a uniform value in [0, 1) to the quadrant whose cumulative bracket contains it.
    pub fn select(&self, u: f32) -> Quadrant {
        let mut cumulative = 0.0;
        for quadrant in Quadrant::ALL {
            let w = self.weight(quadrant);
            cumulative += w;
            if w > 0.0 && u < cumulative {
                return quadrant;
            }
        }
        // rounding left u past the last bracket
        Quadrant::ALL
            .into_iter()
            .rev()
            .find(|q| self.weight(*q) > 0.0)
            .unwrap_or(Quadrant::BottomLeft)
    }
}

impl TryFrom<[f32; 4]> for QuadrantWeights {
    type Error = CoreError;

    fn try_from(weights: [f32; 4]) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<QuadrantWeights> for [f32; 4] {
    fn from(weights: QuadrantWeights) -> Self {
        weights.weights
    }
}

/// Picks a quadrant with one uniform draw.
pub fn sample_quadrant(rng: &mut dyn RandomSource, weights: &QuadrantWeights) -> Quadrant {
    weights.select(rng.next_f32())
}

/// Returns a flight angle in [0, 2π), distributed over quadrants by `weights`.
pub fn distributed_angle(rng: &mut dyn RandomSource, weights: &QuadrantWeights) -> f32 {
    sample_quadrant(rng, weights).sample_angle(rng)
}

/// Unit direction for an angle, with y pointing down the screen.
pub fn direction_of(angle: f32) -> glam::Vec2 {
    glam::Vec2::new(angle.sin(), angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FlybyRng, SequenceRandom};
    use std::f32::consts::PI;

    #[test]
    fn test_default_weights() {
        let w = QuadrantWeights::default();
        assert_eq!(w.as_array(), [0.2, 0.2, 0.3, 0.3]);
        assert_eq!(w.weight(Quadrant::BottomLeft), 0.3);
    }

    #[test]
    fn test_weights_are_normalized() {
        let w = QuadrantWeights::new([1.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(w, QuadrantWeights::uniform());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        assert_eq!(
            QuadrantWeights::new([0.2, -0.1, 0.3, 0.3]),
            Err(CoreError::InvalidWeight {
                index: 1,
                value: -0.1
            })
        );
        assert_eq!(
            QuadrantWeights::new([0.0; 4]),
            Err(CoreError::ZeroWeights)
        );
        assert!(QuadrantWeights::new([f32::INFINITY, 0.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn test_select_brackets() {
        let w = QuadrantWeights::default();
        assert_eq!(w.select(0.0), Quadrant::TopLeft);
        assert_eq!(w.select(0.19), Quadrant::TopLeft);
        assert_eq!(w.select(0.21), Quadrant::TopRight);
        assert_eq!(w.select(0.5), Quadrant::BottomRight);
        assert_eq!(w.select(0.99), Quadrant::BottomLeft);
        assert_eq!(w.select(1.0), Quadrant::BottomLeft);
    }

    #[test]
    fn test_select_skips_zero_weights() {
        let w = QuadrantWeights::new([0.0, 0.0, 1.0, 0.0]).unwrap();
        assert_eq!(w.select(0.0), Quadrant::BottomRight);
        assert_eq!(w.select(0.999), Quadrant::BottomRight);
        assert_eq!(w.select(1.0), Quadrant::BottomRight);
    }

    #[test]
    fn test_sample_angle_stays_in_sector() {
        let mut rng = FlybyRng::new(11);
        for quadrant in Quadrant::ALL {
            for _ in 0..500 {
                let a = quadrant.sample_angle(&mut rng);
                assert!((0.0..TAU).contains(&a));
                assert_eq!(Quadrant::containing(a), quadrant);
            }
        }
    }

    #[test]
    fn test_bottom_right_wraps_through_zero() {
        let mut early = SequenceRandom::constant(0.0);
        let a = Quadrant::BottomRight.sample_angle(&mut early);
        assert!((a - 7.0 * FRAC_PI_4).abs() < 1e-5);

        let mut late = SequenceRandom::constant(0.9);
        let b = Quadrant::BottomRight.sample_angle(&mut late);
        assert!(b < FRAC_PI_4);
    }

    #[test]
    fn test_containing_sector_centers() {
        assert_eq!(Quadrant::containing(PI), Quadrant::TopLeft);
        assert_eq!(Quadrant::containing(FRAC_PI_2), Quadrant::TopRight);
        assert_eq!(Quadrant::containing(0.0), Quadrant::BottomRight);
        assert_eq!(Quadrant::containing(TAU), Quadrant::BottomRight);
        assert_eq!(Quadrant::containing(-0.1), Quadrant::BottomRight);
        assert_eq!(Quadrant::containing(3.0 * FRAC_PI_2), Quadrant::BottomLeft);
    }

    #[test]
    fn test_containing_just_below_top_right() {
        let below = f32::from_bits(FRAC_PI_4.to_bits() - 1);
        assert_eq!(Quadrant::containing(below), Quadrant::BottomRight);
        assert_eq!(Quadrant::containing(FRAC_PI_4), Quadrant::TopRight);
    }

    #[test]
    fn test_quadrant_frequencies_match_weights() {
        let weights = QuadrantWeights::default();
        let mut rng = FlybyRng::new(2024);
        let samples = 20_000;
        let mut counts = [0usize; 4];

        for _ in 0..samples {
            let angle = distributed_angle(&mut rng, &weights);
            counts[Quadrant::containing(angle).index()] += 1;
        }

        for quadrant in Quadrant::ALL {
            let freq = counts[quadrant.index()] as f32 / samples as f32;
            assert!(
                (freq - weights.weight(quadrant)).abs() < 0.02,
                "{quadrant:?}: {freq}"
            );
        }
    }

    #[test]
    fn test_direction_points_down_at_zero() {
        let d = direction_of(0.0);
        assert!(d.x.abs() < 1e-6);
        assert!((d.y - 1.0).abs() < 1e-6);
    }
}
