//! Per-kind flight constants.
//!
//! Social cards and emojis share one motion model; the differences live in a
//! [`FlightPreset`]. The two stock presets are tuned independently and are not
//! meant to agree with each other (fade exponents, thresholds and scale ranges
//! all differ).

use flyby_core::{QuadrantWeights, Span};

use crate::error::MotionError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scale as a function of distance factor: `base + df^exponent * (gain + r * jitter)`.
///
/// `r` is drawn fresh on every update.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaleCurve {
    /// Scale at the spawn depth.
    pub base: f32,
    /// Shape of the growth curve.
    pub exponent: f32,
    /// Growth reached at the screen plane.
    pub gain: f32,
    /// Extra random growth per update.
    pub jitter: f32,
}

impl ScaleCurve {
    /// Largest scale the curve can produce.
    pub fn max(&self) -> f32 {
        self.base + self.gain + self.jitter
    }

    /// Evaluates the curve for a distance factor and a uniform draw `r`.
    pub fn eval(&self, distance_factor: f32, r: f32) -> f32 {
        let df = unit(distance_factor);
        let scale = self.base + df.powf(self.exponent) * (self.gain + unit(r) * self.jitter);
        if scale.is_nan() {
            self.base.max(0.0)
        } else {
            scale.clamp(0.0, self.max().max(0.0))
        }
    }
}

/// Opacity as a function of depth.
///
/// In front of `fade_out_start` the element fades in as
/// `min(ceiling, floor + df^fade_in_exponent * fade_in_gain)`. Past it, the
/// element fades out as `ceiling - f²` where `f` is the normalized position
/// inside `fade_out_window`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OpacityCurve {
    /// Opacity at the spawn depth.
    pub floor: f32,
    /// Upper bound while visible.
    pub ceiling: f32,
    /// Fade-in gain.
    pub fade_in_gain: f32,
    /// Fade-in shape.
    pub fade_in_exponent: f32,
    /// Depth at which fading out begins.
    pub fade_out_start: f32,
    /// Depth span over which the element fades to `ceiling - 1`.
    pub fade_out_window: f32,
}

impl OpacityCurve {
    /// Evaluates opacity at `depth`. Always returns a value in [0, 1].
    pub fn eval(&self, depth: f32, distance_factor: f32) -> f32 {
        if depth.is_nan() {
            return 0.0;
        }
        let opacity = if depth < self.fade_out_start {
            let df = unit(distance_factor);
            (self.floor + df.powf(self.fade_in_exponent) * self.fade_in_gain).min(self.ceiling)
        } else {
            let f = unit((depth - self.fade_out_start) / self.fade_out_window);
            (self.ceiling - f * f).max(0.0)
        };
        unit(opacity)
    }
}

/// Rotation in degrees: a random initial angle plus a per-update step
/// of `step + df * distance_gain`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotationCurve {
    /// Initial angle range.
    pub initial: Span,
    /// Constant step per update.
    pub step: f32,
    /// Extra step at the screen plane.
    pub distance_gain: f32,
}

impl RotationCurve {
    /// Rotation added by one update.
    pub fn increment(&self, distance_factor: f32) -> f32 {
        self.step + unit(distance_factor) * self.distance_gain
    }
}

/// Constants for one element kind.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlightPreset {
    /// Base travel time in ms, drawn once per flight.
    pub speed: Span,
    /// Exponent applied to `elapsed / speed`.
    pub easing_exponent: f32,
    /// Depth covered when `elapsed == speed`.
    pub travel_distance: f32,
    /// Spawn depth range.
    pub start_depth: Span,
    /// Depth where the distance factor is zero.
    pub far_depth: f32,
    /// Lateral reach as a fraction of the longer viewport side.
    pub fly_reach: f32,
    /// Exponent applied to the distance factor for lateral travel.
    pub fly_exponent: f32,
    /// Length of the direction vector.
    pub direction_strength: Span,
    /// Weights used to pick the flight direction.
    pub quadrant_weights: QuadrantWeights,
    /// Maximum origin offset from the viewport center, in px per axis.
    pub origin_jitter: f32,
    /// Scale curve.
    pub scale: ScaleCurve,
    /// Scale before the first update.
    pub initial_scale: Span,
    /// Opacity before the first update.
    pub initial_opacity: Span,
    /// Opacity curve.
    pub opacity: OpacityCurve,
    /// Rotation curve.
    pub rotation: RotationCurve,
    /// Depth at which the flight completes.
    pub completion_depth: f32,
    /// Minimum time between updates, in ms.
    pub update_interval: f32,
    /// Delay before the flight starts moving, in ms.
    pub start_delay: Span,
}

impl FlightPreset {
    /// Preset for social-media cards.
    pub fn social() -> Self {
        Self {
            speed: Span::new(400.0, 650.0),
            easing_exponent: 1.3,
            travel_distance: 900.0,
            start_depth: Span::new(-1200.0, -800.0),
            far_depth: -800.0,
            fly_reach: 0.4,
            fly_exponent: 0.7,
            direction_strength: Span::new(1.0, 2.0),
            quadrant_weights: QuadrantWeights::default(),
            origin_jitter: 50.0,
            scale: ScaleCurve {
                base: 0.05,
                exponent: 1.0,
                gain: 0.8,
                jitter: 0.3,
            },
            initial_scale: Span::new(0.05, 0.15),
            initial_opacity: Span::new(0.2, 0.5),
            opacity: OpacityCurve {
                floor: 0.1,
                ceiling: 0.95,
                fade_in_gain: 0.9,
                fade_in_exponent: 0.5,
                fade_out_start: 100.0,
                fade_out_window: 150.0,
            },
            rotation: RotationCurve {
                initial: Span::new(-20.0, 20.0),
                step: 0.0,
                distance_gain: 0.0,
            },
            completion_depth: 150.0,
            update_interval: 120.0,
            start_delay: Span::new(0.0, 1000.0),
        }
    }

    /// Preset for emojis: stronger easing, larger scale and a spin that speeds up near the viewer.
    pub fn emoji() -> Self {
        Self {
            speed: Span::new(400.0, 700.0),
            easing_exponent: 1.7,
            travel_distance: 1200.0,
            direction_strength: Span::new(1.2, 2.2),
            scale: ScaleCurve {
                base: 0.05,
                exponent: 0.8,
                gain: 2.0,
                jitter: 1.0,
            },
            initial_scale: Span::fixed(0.05),
            initial_opacity: Span::fixed(0.1),
            opacity: OpacityCurve {
                fade_in_exponent: 0.6,
                ..Self::social().opacity
            },
            rotation: RotationCurve {
                initial: Span::new(0.0, 180.0),
                step: 1.0,
                distance_gain: 2.0,
            },
            completion_depth: 250.0,
            update_interval: 100.0,
            start_delay: Span::new(0.0, 2000.0),
            ..Self::social()
        }
    }

    /// Builder: set the completion depth.
    pub fn with_completion_depth(mut self, depth: f32) -> Self {
        self.completion_depth = depth;
        self
    }

    /// Builder: set the minimum update interval (ms).
    pub fn with_update_interval(mut self, interval: f32) -> Self {
        self.update_interval = interval;
        self
    }

    /// Builder: set the start delay range (ms).
    pub fn with_start_delay(mut self, delay: Span) -> Self {
        self.start_delay = delay;
        self
    }

    /// Builder: set the travel speed range (ms).
    pub fn with_speed(mut self, speed: Span) -> Self {
        self.speed = speed;
        self
    }

    /// Builder: set the quadrant weights for flight directions.
    pub fn with_quadrant_weights(mut self, weights: QuadrantWeights) -> Self {
        self.quadrant_weights = weights;
        self
    }

    /// Largest scale this preset can produce.
    pub fn max_scale(&self) -> f32 {
        self.scale.max().max(self.initial_scale.max)
    }

    /// Checks that the preset produces finite, forward-moving flights.
    pub fn validate(&self) -> Result<(), MotionError> {
        self.speed.validate("speed")?;
        self.start_depth.validate("start_depth")?;
        self.direction_strength.validate("direction_strength")?;
        self.initial_scale.validate("initial_scale")?;
        self.initial_opacity.validate("initial_opacity")?;
        self.rotation.initial.validate("rotation.initial")?;
        self.start_delay.validate("start_delay")?;

        if !(self.easing_exponent > 1.0) || !self.easing_exponent.is_finite() {
            return Err(MotionError::EasingNotSuperLinear(self.easing_exponent));
        }
        positive("speed.min", self.speed.min)?;
        positive("travel_distance", self.travel_distance)?;
        positive("opacity.fade_out_window", self.opacity.fade_out_window)?;
        non_negative("fly_reach", self.fly_reach)?;
        non_negative("fly_exponent", self.fly_exponent)?;
        non_negative("origin_jitter", self.origin_jitter)?;
        non_negative("scale.base", self.scale.base)?;
        non_negative("scale.exponent", self.scale.exponent)?;
        non_negative("scale.gain", self.scale.gain)?;
        non_negative("scale.jitter", self.scale.jitter)?;
        non_negative("initial_scale.min", self.initial_scale.min)?;
        non_negative("opacity.fade_in_exponent", self.opacity.fade_in_exponent)?;
        non_negative("update_interval", self.update_interval)?;
        non_negative("start_delay.min", self.start_delay.min)?;
        within_unit("opacity.floor", self.opacity.floor)?;
        within_unit("opacity.ceiling", self.opacity.ceiling)?;
        within_unit("initial_opacity.min", self.initial_opacity.min)?;
        within_unit("initial_opacity.max", self.initial_opacity.max)?;

        if !(self.far_depth < 0.0) {
            return Err(MotionError::FarDepthNotBehindScreen(self.far_depth));
        }
        if !(self.completion_depth > self.start_depth.max) {
            return Err(MotionError::CompletionBeforeStart {
                completion: self.completion_depth,
                start: self.start_depth.max,
            });
        }
        Ok(())
    }
}

/// Clamps to [0, 1], mapping NaN to 0.
pub(crate) fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), MotionError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(MotionError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), MotionError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(MotionError::Negative { name, value })
    }
}

fn within_unit(name: &'static str, value: f32) -> Result<(), MotionError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MotionError::OutsideUnit { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_presets_validate() {
        assert_eq!(FlightPreset::social().validate(), Ok(()));
        assert_eq!(FlightPreset::emoji().validate(), Ok(()));
    }

    #[test]
    fn test_presets_differ_where_tuned() {
        let social = FlightPreset::social();
        let emoji = FlightPreset::emoji();
        assert_eq!(social.completion_depth, 150.0);
        assert_eq!(emoji.completion_depth, 250.0);
        assert!(emoji.easing_exponent > social.easing_exponent);
        assert!(emoji.max_scale() > social.max_scale());
        assert_eq!(emoji.opacity.fade_out_start, social.opacity.fade_out_start);
        assert_ne!(emoji.opacity.fade_in_exponent, social.opacity.fade_in_exponent);
    }

    #[test]
    fn test_linear_easing_rejected() {
        let mut preset = FlightPreset::social();
        preset.easing_exponent = 1.0;
        assert_eq!(
            preset.validate(),
            Err(MotionError::EasingNotSuperLinear(1.0))
        );
    }

    #[test]
    fn test_inverted_span_rejected() {
        let preset = FlightPreset::emoji().with_speed(Span::new(700.0, 400.0));
        assert!(matches!(preset.validate(), Err(MotionError::Core(_))));
    }

    #[test]
    fn test_completion_in_front_of_start_required() {
        let preset = FlightPreset::social().with_completion_depth(-900.0);
        assert!(matches!(
            preset.validate(),
            Err(MotionError::CompletionBeforeStart { .. })
        ));
    }

    #[test]
    fn test_zero_speed_rejected() {
        let preset = FlightPreset::social().with_speed(Span::new(0.0, 10.0));
        assert!(matches!(
            preset.validate(),
            Err(MotionError::NonPositive { name: "speed.min", .. })
        ));
    }

    #[test]
    fn test_scale_curve_bounds() {
        let curve = FlightPreset::emoji().scale;
        assert_eq!(curve.eval(0.0, 0.5), 0.05);
        assert!((curve.eval(1.0, 0.999_999) - curve.max()).abs() < 1e-4);
        assert_eq!(curve.eval(f32::NAN, f32::NAN), 0.05);
        assert!(curve.eval(5.0, 5.0) <= curve.max());
    }

    #[test]
    fn test_opacity_curve_phases() {
        let curve = FlightPreset::social().opacity;
        assert!((curve.eval(-1000.0, 0.0) - 0.1).abs() < 1e-6);
        assert_eq!(curve.eval(0.0, 1.0), 0.95);
        assert_eq!(curve.eval(100.0, 1.0), 0.95);
        assert!((curve.eval(175.0, 1.0) - (0.95 - 0.25)).abs() < 1e-5);
        assert_eq!(curve.eval(1000.0, 1.0), 0.0);
        assert_eq!(curve.eval(f32::NAN, f32::NAN), 0.0);
    }

    #[test]
    fn test_rotation_increment() {
        let emoji = FlightPreset::emoji().rotation;
        assert_eq!(emoji.increment(0.0), 1.0);
        assert_eq!(emoji.increment(1.0), 3.0);
        assert_eq!(FlightPreset::social().rotation.increment(1.0), 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_preset_serde() {
        let preset = FlightPreset::emoji();
        let json = serde_json::to_string(&preset).unwrap();
        let parsed: FlightPreset = serde_json::from_str(&json).unwrap();
        assert_eq!(preset, parsed);
    }
}
