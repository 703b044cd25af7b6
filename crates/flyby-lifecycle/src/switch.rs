//! The suppression switch ("focus mode").

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Effect of setting the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// Went from active to suppressed.
    Suppressed,
    /// Went from suppressed to active.
    Resumed,
    /// Already in the requested mode.
    Unchanged,
}

/// Boolean mode source. When suppressed, no elements exist or spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SuppressionSwitch {
    suppressed: bool,
}

impl SuppressionSwitch {
    /// Creates a switch in the given mode.
    pub fn new(suppressed: bool) -> Self {
        Self { suppressed }
    }

    /// Returns true while suppressed.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Sets the mode and reports the transition.
    pub fn set(&mut self, suppressed: bool) -> ModeChange {
        match (self.suppressed, suppressed) {
            (false, true) => {
                self.suppressed = true;
                ModeChange::Suppressed
            }
            (true, false) => {
                self.suppressed = false;
                ModeChange::Resumed
            }
            _ => ModeChange::Unchanged,
        }
    }

    /// Flips the mode.
    pub fn toggle(&mut self) -> ModeChange {
        self.set(!self.suppressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut switch = SuppressionSwitch::default();
        assert!(!switch.is_suppressed());
        assert_eq!(switch.set(false), ModeChange::Unchanged);
        assert_eq!(switch.set(true), ModeChange::Suppressed);
        assert_eq!(switch.set(true), ModeChange::Unchanged);
        assert_eq!(switch.toggle(), ModeChange::Resumed);
        assert_eq!(switch.toggle(), ModeChange::Suppressed);
        assert!(switch.is_suppressed());
    }
}
