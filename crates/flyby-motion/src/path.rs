//! Spawn-time flight lines and the pure depth/position functions over them.

use flyby_core::{RandomSource, Viewport, direction_of, distributed_angle};
use glam::{Vec2, Vec3};

use crate::preset::{FlightPreset, unit};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a flight starts and which way it drifts. Fixed at spawn.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlightPath {
    /// Spawn position: screen x/y in px and depth.
    pub origin: Vec3,
    /// Lateral drift per unit of fly magnitude (not normalized).
    pub direction: Vec2,
    /// Base travel time in ms.
    pub speed: f32,
    /// Lateral distance reached at the screen plane, in px, before `direction` scaling.
    pub reach: f32,
    /// Constants of the element kind.
    pub preset: FlightPreset,
}

/// Depth, distance factor and position at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Depth (negative is behind the screen).
    pub depth: f32,
    /// Normalized progress from the far depth to the screen plane.
    pub distance_factor: f32,
    /// Screen position in px.
    pub position: Vec2,
}

impl FlightPath {
    /// Draws a new flight line for `preset` in `viewport`.
    ///
    /// Origin is the viewport center jittered by up to `origin_jitter` px per
    /// axis; the direction comes from the preset's quadrant weights.
    pub fn spawn(preset: &FlightPreset, viewport: Viewport, rng: &mut dyn RandomSource) -> Self {
        let center = viewport.center();
        let jitter = preset.origin_jitter;
        let x = center.x + rng.range(-jitter, jitter);
        let y = center.y + rng.range(-jitter, jitter);
        let depth = preset.start_depth.sample(rng);

        let angle = distributed_angle(rng, &preset.quadrant_weights);
        let strength = preset.direction_strength.sample(rng);
        let speed = preset.speed.sample(rng);

        Self {
            origin: Vec3::new(x, y, depth),
            direction: direction_of(angle) * strength,
            speed,
            reach: viewport.max_side() * preset.fly_reach,
            preset: preset.clone(),
        }
    }

    /// Creates a path from explicit values.
    pub fn new(origin: Vec3, direction: Vec2, speed: f32, reach: f32, preset: FlightPreset) -> Self {
        Self {
            origin,
            direction,
            speed,
            reach,
            preset,
        }
    }

    /// Eased progress after `elapsed` ms. Negative or NaN elapsed counts as 0.
    pub fn progress(&self, elapsed: f32) -> f32 {
        let elapsed = if elapsed.is_nan() { 0.0 } else { elapsed.max(0.0) };
        (elapsed / self.speed).powf(self.preset.easing_exponent)
    }

    /// Depth after `elapsed` ms. Non-decreasing in `elapsed`.
    pub fn depth_at(&self, elapsed: f32) -> f32 {
        self.origin.z + self.progress(elapsed) * self.preset.travel_distance
    }

    /// Distance factor for a depth: 0 at the far depth or behind, 1 at the screen plane or past.
    pub fn distance_factor(&self, depth: f32) -> f32 {
        let far = self.preset.far_depth;
        unit((depth - far) / (0.0 - far))
    }

    /// Samples the path after `elapsed` ms.
    ///
    /// Depends only on `elapsed`, never on how many updates came before.
    pub fn sample(&self, elapsed: f32) -> PathSample {
        let depth = self.depth_at(elapsed);
        let distance_factor = self.distance_factor(depth);
        let fly = distance_factor.powf(self.preset.fly_exponent) * self.reach;

        PathSample {
            depth,
            distance_factor,
            position: self.origin.truncate() + self.direction * fly,
        }
    }

    /// Elapsed time at which the path reaches `depth`, or `None` if it starts past it.
    pub fn time_to_depth(&self, depth: f32) -> Option<f32> {
        let remaining = depth - self.origin.z;
        if remaining < 0.0 {
            return None;
        }
        let progress = remaining / self.preset.travel_distance;
        Some(self.speed * progress.powf(1.0 / self.preset.easing_exponent))
    }

    /// Elapsed time at which the flight completes.
    pub fn completion_time(&self) -> Option<f32> {
        self.time_to_depth(self.preset.completion_depth)
    }
}
