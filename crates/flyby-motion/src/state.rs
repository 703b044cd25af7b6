//! Per-element motion state and the tick function that advances it.

use flyby_core::RandomSource;
use glam::Vec2;

use crate::path::FlightPath;
use crate::preset::unit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything a display surface needs to draw one element.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionState {
    /// Screen position in px. Unbounded.
    pub position: Vec2,
    /// Depth (negative is behind the screen).
    pub depth: f32,
    /// Normalized progress toward the screen plane.
    pub distance_factor: f32,
    /// Uniform scale.
    pub scale: f32,
    /// Opacity in [0, 1].
    pub opacity: f32,
    /// Rotation in degrees.
    pub rotation: f32,
}

/// Result of advancing a [`MotionState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    /// The new state.
    pub state: MotionState,
    /// True once depth has reached the completion threshold.
    pub completed: bool,
}

impl MotionState {
    /// State before the first update: spawn point with the preset's initial look.
    pub fn initial(path: &FlightPath, rng: &mut dyn RandomSource) -> Self {
        let preset = &path.preset;
        Self {
            position: path.origin.truncate(),
            depth: path.origin.z,
            distance_factor: path.distance_factor(path.origin.z),
            scale: preset.initial_scale.sample(rng).max(0.0),
            opacity: unit(preset.initial_opacity.sample(rng)),
            rotation: preset.rotation.initial.sample(rng),
        }
    }

    /// Computes the state `elapsed` ms into the flight.
    ///
    /// Depth and position come from the path alone. Scale draws one random
    /// value; rotation accumulates onto the current rotation.
    pub fn advance(&self, path: &FlightPath, elapsed: f32, rng: &mut dyn RandomSource) -> MotionStep {
        let preset = &path.preset;
        let sample = path.sample(elapsed);
        let df = sample.distance_factor;

        let state = MotionState {
            position: sample.position,
            depth: sample.depth,
            distance_factor: df,
            scale: preset.scale.eval(df, rng.next_f32()),
            opacity: preset.opacity.eval(sample.depth, df),
            rotation: self.rotation + preset.rotation.increment(df),
        };

        MotionStep {
            state,
            completed: sample.depth >= preset.completion_depth,
        }
    }

    /// Stacking order for drawing; closer elements get larger values.
    ///
    /// Saturates at the `i32` bounds for depths far outside the flight range.
    pub fn stacking_order(&self) -> i32 {
        if self.depth.is_nan() {
            return 0;
        }
        // float-to-int `as` saturates, so the multiply stays in f32
        (((self.depth + 1000.0) / 10.0).floor() * 10.0) as i32
    }
}
