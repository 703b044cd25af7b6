//! Error types for flyby-lifecycle.

use flyby_core::CoreError;
use flyby_motion::MotionError;
use thiserror::Error;

use crate::pool::PoolKind;

/// Errors reported by [`FieldConfig::validate`](crate::FieldConfig::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A pool's flight preset is invalid.
    #[error("{pool} preset: {source}")]
    Preset {
        /// Pool the preset belongs to.
        pool: PoolKind,
        /// Underlying preset error.
        #[source]
        source: MotionError,
    },

    /// A span (e.g. a replacement delay) is invalid.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Replacement delays must not be negative.
    #[error("{0} replacement delay must not be negative")]
    NegativeDelay(PoolKind),

    /// Pools must hold at least one element.
    #[error("{0} pool capacity must be at least 1")]
    ZeroCapacity(PoolKind),

    /// At least one spawn wave is required.
    #[error("no spawn waves configured")]
    NoWaves,

    /// A wave share is negative or not finite.
    #[error("wave {index} has invalid share {share}")]
    InvalidWaveShare {
        /// Wave index.
        index: usize,
        /// Offending share.
        share: f32,
    },

    /// Wave shares must add up to one.
    #[error("wave shares sum to {0}, expected 1")]
    WaveSharesSum(f32),

    /// Wave offsets must be non-negative and non-decreasing.
    #[error("wave {index} offset {offset} is negative or earlier than the previous wave")]
    WaveOffset {
        /// Wave index.
        index: usize,
        /// Offending offset in ms.
        offset: f32,
    },
}
