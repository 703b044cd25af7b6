//! One element's animation: start delay, throttled updates, single completion.

use flyby_core::{RandomSource, Viewport};

use crate::path::FlightPath;
use crate::preset::FlightPreset;
use crate::state::MotionState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a flight is in its lifecycle. Times are absolute host time in ms.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlightPhase {
    /// Spawned, not yet moving.
    Waiting {
        /// Time at which motion begins.
        until: f64,
    },
    /// Moving toward the viewer.
    Flying {
        /// Time motion began.
        started_at: f64,
        /// Time of the last applied update.
        last_update: Option<f64>,
    },
    /// Passed the completion depth.
    Completed,
}

/// Outcome of [`Flight::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightEvent {
    /// Nothing changed (waiting, throttled, or already completed).
    Idle,
    /// State was recomputed.
    Updated,
    /// State was recomputed and the flight just completed. Reported once.
    Completed,
}

/// A path plus its evolving state.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Flight {
    path: FlightPath,
    state: MotionState,
    phase: FlightPhase,
    updates: u32,
}

impl Flight {
    /// Creates a flight that starts moving `start_delay` ms after `now`.
    pub fn new(path: FlightPath, now: f64, start_delay: f32, rng: &mut dyn RandomSource) -> Self {
        let state = MotionState::initial(&path, rng);
        Self {
            path,
            state,
            phase: FlightPhase::Waiting {
                until: now + f64::from(start_delay.max(0.0)),
            },
            updates: 0,
        }
    }

    /// Spawns a flight for `preset` with a random path and start delay.
    pub fn spawn(
        preset: &FlightPreset,
        viewport: Viewport,
        now: f64,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let path = FlightPath::spawn(preset, viewport, rng);
        let delay = preset.start_delay.sample(rng);
        Self::new(path, now, delay, rng)
    }

    /// Returns the flight line.
    pub fn path(&self) -> &FlightPath {
        &self.path
    }

    /// Returns the current state.
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Returns the current phase.
    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    /// Number of updates applied so far.
    pub fn updates(&self) -> u32 {
        self.updates
    }

    /// Returns true once the completion depth has been reached.
    pub fn is_completed(&self) -> bool {
        matches!(self.phase, FlightPhase::Completed)
    }

    /// Returns true while the start delay is running.
    pub fn is_waiting(&self) -> bool {
        matches!(self.phase, FlightPhase::Waiting { .. })
    }

    /// Advances the flight to host time `now`.
    ///
    /// Updates closer together than the preset's `update_interval` are skipped.
    /// Elapsed time is measured from the end of the start delay, so the
    /// resulting depth and position depend only on `now`.
    pub fn tick(&mut self, now: f64, rng: &mut dyn RandomSource) -> FlightEvent {
        let (started_at, last_update) = match self.phase {
            FlightPhase::Completed => return FlightEvent::Idle,
            FlightPhase::Waiting { until } if now < until => return FlightEvent::Idle,
            FlightPhase::Waiting { until } => (until, None),
            FlightPhase::Flying {
                started_at,
                last_update,
            } => (started_at, last_update),
        };

        if let Some(last) = last_update {
            if now - last < f64::from(self.path.preset.update_interval) {
                return FlightEvent::Idle;
            }
        }

        let elapsed = (now - started_at) as f32;
        let step = self.state.advance(&self.path, elapsed, rng);
        self.state = step.state;
        self.updates += 1;

        if step.completed {
            self.phase = FlightPhase::Completed;
            FlightEvent::Completed
        } else {
            self.phase = FlightPhase::Flying {
                started_at,
                last_update: Some(now),
            };
            FlightEvent::Updated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyby_core::{FlybyRng, Span};
    use glam::{Vec2, Vec3};

    fn flight(preset: FlightPreset, delay: f32) -> Flight {
        let path = FlightPath::new(
            Vec3::new(400.0, 300.0, -1000.0),
            Vec2::new(-1.0, 1.0),
            500.0,
            320.0,
            preset,
        );
        Flight::new(path, 0.0, delay, &mut FlybyRng::new(1))
    }

    #[test]
    fn test_waits_for_start_delay() {
        let mut f = flight(FlightPreset::social(), 300.0);
        let mut rng = FlybyRng::new(2);
        assert_eq!(f.tick(0.0, &mut rng), FlightEvent::Idle);
        assert_eq!(f.tick(299.0, &mut rng), FlightEvent::Idle);
        assert!(f.is_waiting());
        assert_eq!(f.tick(300.0, &mut rng), FlightEvent::Updated);
        assert_eq!(f.state().depth, -1000.0);
        assert_eq!(f.updates(), 1);
    }

    #[test]
    fn test_throttle_skips_close_updates() {
        let mut f = flight(FlightPreset::social(), 0.0);
        let mut rng = FlybyRng::new(2);
        assert_eq!(f.tick(0.0, &mut rng), FlightEvent::Updated);
        assert_eq!(f.tick(60.0, &mut rng), FlightEvent::Idle);
        assert_eq!(f.tick(119.0, &mut rng), FlightEvent::Idle);
        assert_eq!(f.tick(120.0, &mut rng), FlightEvent::Updated);
        assert_eq!(f.updates(), 2);
    }

    #[test]
    fn test_throttle_does_not_change_depth() {
        let preset = FlightPreset::emoji().with_update_interval(100.0);
        let mut coarse = flight(preset.clone(), 0.0);
        let mut fine = flight(preset, 0.0);
        let mut rng = FlybyRng::new(3);

        for frame in 0..=30 {
            fine.tick(frame as f64 * 16.0, &mut rng);
        }
        // 16 ms frames under a 100 ms throttle apply updates at 0, 112, 224, 336, 448
        coarse.tick(0.0, &mut rng);
        coarse.tick(448.0, &mut rng);

        let fine_depth = fine.path().depth_at(448.0);
        assert_eq!(coarse.state().depth, fine_depth);
        assert_eq!(fine.state().depth, fine.path().depth_at(448.0));
        assert!(fine.updates() > coarse.updates());
    }

    #[test]
    fn test_completes_exactly_once() {
        let mut f = flight(FlightPreset::social(), 0.0);
        let mut rng = FlybyRng::new(5);
        let mut completions = 0;
        let mut previous_depth = f.state().depth;
        for frame in 0..500 {
            let now = frame as f64 * 16.0;
            match f.tick(now, &mut rng) {
                FlightEvent::Completed => {
                    completions += 1;
                    assert!(f.state().depth >= 150.0);
                    // the update before completion was still short of the threshold
                    assert!(previous_depth < 150.0, "previous depth {previous_depth}");
                }
                FlightEvent::Updated => {
                    assert!(f.state().depth < 150.0);
                    previous_depth = f.state().depth;
                }
                FlightEvent::Idle => {}
            }
        }
        assert_eq!(completions, 1);
        assert!(f.is_completed());
    }

    #[test]
    fn test_long_pause_completes_without_panic() {
        let mut f = flight(FlightPreset::emoji(), 0.0);
        let mut rng = FlybyRng::new(8);
        assert_eq!(f.tick(0.0, &mut rng), FlightEvent::Updated);
        assert_eq!(f.tick(1.0e7, &mut rng), FlightEvent::Completed);
        assert!(f.state().depth > 1.0e9);
        assert_eq!(f.state().stacking_order(), i32::MAX);
    }

    #[test]
    fn test_spawn_uses_preset_delay() {
        let preset = FlightPreset::emoji().with_start_delay(Span::fixed(250.0));
        let mut rng = FlybyRng::new(6);
        let f = Flight::spawn(&preset, Viewport::default(), 1000.0, &mut rng);
        assert_eq!(f.phase(), FlightPhase::Waiting { until: 1250.0 });
    }
}
