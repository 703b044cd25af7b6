//! Field configuration: pool sizes, replacement delays and spawn waves.

use flyby_core::Span;
use flyby_motion::FlightPreset;

use crate::error::ConfigError;
use crate::pool::PoolKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for one pool.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoolConfig {
    /// Maximum number of live elements.
    pub capacity: usize,
    /// Delay in ms before a completed element is replaced.
    pub replacement_delay: Span,
    /// Motion constants for the pool's elements.
    pub preset: FlightPreset,
}

impl PoolConfig {
    /// Social cards: six at a time, replaced after 200-1000 ms.
    pub fn social() -> Self {
        Self {
            capacity: 6,
            replacement_delay: Span::new(200.0, 1000.0),
            preset: FlightPreset::social(),
        }
    }

    /// Emoji: eight at a time, replaced after 100-700 ms.
    pub fn emoji() -> Self {
        Self {
            capacity: 8,
            replacement_delay: Span::new(100.0, 700.0),
            preset: FlightPreset::emoji(),
        }
    }

    /// Default settings for `kind`.
    pub fn for_kind(kind: PoolKind) -> Self {
        match kind {
            PoolKind::Social => Self::social(),
            PoolKind::Emoji => Self::emoji(),
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_replacement_delay(mut self, delay: Span) -> Self {
        self.replacement_delay = delay;
        self
    }

    pub fn with_preset(mut self, preset: FlightPreset) -> Self {
        self.preset = preset;
        self
    }

    fn validate(&self, kind: PoolKind) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity(kind));
        }
        self.replacement_delay.validate("replacement_delay")?;
        if self.replacement_delay.min < 0.0 {
            return Err(ConfigError::NegativeDelay(kind));
        }
        self.preset
            .validate()
            .map_err(|source| ConfigError::Preset { pool: kind, source })
    }
}

/// One batch of the initial fill.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wave {
    /// Delay in ms after initialization.
    pub offset: f32,
    /// Fraction of each pool's capacity spawned by this wave.
    pub share: f32,
}

impl Wave {
    pub const fn new(offset: f32, share: f32) -> Self {
        Self { offset, share }
    }
}

/// Everything a [`ChaosField`](crate::ChaosField) needs besides randomness and a viewport.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldConfig {
    /// Social card pool.
    pub social: PoolConfig,
    /// Emoji pool.
    pub emoji: PoolConfig,
    /// Initial fill schedule. Shares must sum to 1.
    pub waves: Vec<Wave>,
    /// Start in suppression mode.
    pub start_suppressed: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            social: PoolConfig::social(),
            emoji: PoolConfig::emoji(),
            waves: vec![
                Wave::new(0.0, 0.5),
                Wave::new(800.0, 0.3),
                Wave::new(1800.0, 0.2),
            ],
            start_suppressed: false,
        }
    }
}

impl FieldConfig {
    /// Settings of one pool.
    pub fn pool(&self, kind: PoolKind) -> &PoolConfig {
        match kind {
            PoolKind::Social => &self.social,
            PoolKind::Emoji => &self.emoji,
        }
    }

    pub fn with_pool(mut self, kind: PoolKind, config: PoolConfig) -> Self {
        match kind {
            PoolKind::Social => self.social = config,
            PoolKind::Emoji => self.emoji = config,
        }
        self
    }

    pub fn with_waves(mut self, waves: Vec<Wave>) -> Self {
        self.waves = waves;
        self
    }

    pub fn with_start_suppressed(mut self, suppressed: bool) -> Self {
        self.start_suppressed = suppressed;
        self
    }

    /// Checks both pools and the wave schedule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in PoolKind::ALL {
            self.pool(kind).validate(kind)?;
        }
        if self.waves.is_empty() {
            return Err(ConfigError::NoWaves);
        }

        let mut previous = 0.0;
        let mut total = 0.0;
        for (index, wave) in self.waves.iter().enumerate() {
            if !wave.share.is_finite() || wave.share < 0.0 {
                return Err(ConfigError::InvalidWaveShare {
                    index,
                    share: wave.share,
                });
            }
            if !wave.offset.is_finite() || wave.offset < previous {
                return Err(ConfigError::WaveOffset {
                    index,
                    offset: wave.offset,
                });
            }
            previous = wave.offset;
            total += wave.share;
        }
        if (total - 1.0).abs() > 1e-3 {
            return Err(ConfigError::WaveSharesSum(total));
        }
        Ok(())
    }

    /// Number of elements each wave spawns for a pool of `capacity`.
    ///
    /// Rounds cumulative shares so the sizes always add up to `capacity`.
    pub fn wave_sizes(&self, capacity: usize) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.waves.len());
        let mut cumulative = 0.0f32;
        let mut assigned = 0usize;
        for (index, wave) in self.waves.iter().enumerate() {
            let target = if index + 1 == self.waves.len() {
                capacity
            } else {
                cumulative += wave.share.max(0.0);
                ((cumulative * capacity as f32).round() as usize).min(capacity)
            };
            let size = target.saturating_sub(assigned);
            sizes.push(size);
            assigned += size;
        }
        sizes
    }
}
