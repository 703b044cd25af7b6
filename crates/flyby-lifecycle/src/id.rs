//! Element identifiers.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies a live element.
///
/// The serial restarts at 0 after every suppression; the epoch counts
/// suppressions, so ids from before a reset never match a live element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementId {
    /// Number of resets before this id was issued.
    pub epoch: u32,
    /// Position in the allocation order within the epoch.
    pub serial: u32,
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.epoch, self.serial)
    }
}

/// Issues [`ElementId`]s.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    epoch: u32,
    next: u32,
}

impl IdAllocator {
    /// Creates an allocator at epoch 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id.
    pub fn allocate(&mut self) -> ElementId {
        let id = ElementId {
            epoch: self.epoch,
            serial: self.next,
        };
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Restarts the serial counter in a new epoch.
    pub fn reset(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.next = 0;
    }

    /// Current epoch.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }
}
