//! Pool lifecycle for the flyby background.
//!
//! A [`ChaosField`] keeps a bounded pool of social cards and a bounded pool of
//! emoji in flight. Both pools fill in timed waves; every element that flies
//! past the viewer is replaced after a short random delay. While suppressed the
//! field holds nothing at all.
//!
//! The field owns no clock and no thread: the host calls
//! [`ChaosField::advance`] with its current time once per frame, then draws
//! [`ChaosField::frame`] or calls [`ChaosField::render`] with a
//! [`DisplaySurface`].
//!
//! # Example
//!
//! ```
//! use flyby_lifecycle::{ChaosField, FieldConfig, FrameRecorder, PoolKind};
//!
//! let mut field = ChaosField::seeded(FieldConfig::default(), 42).unwrap();
//! field.start(0.0);
//!
//! let mut recorder = FrameRecorder::new();
//! for frame in 0..120 {
//!     let now = frame as f64 * 16.0;
//!     field.advance(now);
//!     field.render(recorder.at(now));
//! }
//! assert_eq!(field.pool(PoolKind::Social).capacity(), 6);
//! assert!(field.pool(PoolKind::Emoji).len() <= 8);
//!
//! field.set_suppressed(true, 2000.0);
//! assert!(field.is_empty());
//! ```

mod config;
mod error;
mod field;
mod id;
mod pool;
mod render;
mod switch;
mod timeline;

pub use config::{FieldConfig, PoolConfig, Wave};
pub use error::ConfigError;
pub use field::ChaosField;
pub use id::{ElementId, IdAllocator};
pub use pool::{Element, InsertRejected, Member, Pool, PoolKind};
pub use render::{DisplaySurface, Frame, FrameRecorder, Sprite};
pub use switch::{ModeChange, SuppressionSwitch};
pub use timeline::{DueTimer, TimerId, Timeline};
