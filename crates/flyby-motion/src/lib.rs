//! Depth-eased flight model for flyby elements.
//!
//! Every element flies from far behind the screen toward and past the viewer.
//! One model drives both element kinds; a [`FlightPreset`] holds the per-kind
//! constants:
//! - [`FlightPath`] - spawn-time origin, direction and speed, plus the pure
//!   `elapsed -> depth/position` functions
//! - [`MotionState`] - the drawable state, advanced by [`MotionState::advance`]
//! - [`Flight`] - start delay, update throttling and single completion
//!
//! # Example
//!
//! ```
//! use flyby_core::{FlybyRng, Viewport};
//! use flyby_motion::{Flight, FlightEvent, FlightPreset};
//!
//! let mut rng = FlybyRng::new(1);
//! let mut flight = Flight::spawn(&FlightPreset::social(), Viewport::default(), 0.0, &mut rng);
//!
//! let mut now = 0.0;
//! while flight.tick(now, &mut rng) != FlightEvent::Completed {
//!     now += 16.0;
//! }
//! assert!(flight.state().depth >= 150.0);
//! ```

mod error;
mod flight;
mod path;
mod preset;
mod state;

pub use error::MotionError;
pub use flight::{Flight, FlightEvent, FlightPhase};
pub use path::{FlightPath, PathSample};
pub use preset::{FlightPreset, OpacityCurve, RotationCurve, ScaleCurve};
pub use state::{MotionState, MotionStep};
