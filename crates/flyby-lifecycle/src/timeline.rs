//! One-shot timers on a host-driven clock.
//!
//! Stands in for `setTimeout`: the host never sleeps, it calls
//! [`Timeline::pop_due`] with the current time and gets back every timer whose
//! deadline has passed, earliest first.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A fired timer.
#[derive(Debug, Clone, PartialEq)]
pub struct DueTimer<T> {
    /// Handle the timer was scheduled under.
    pub id: TimerId,
    /// Deadline in host time (ms).
    pub at: f64,
    /// Scheduled payload.
    pub payload: T,
}

struct Entry<T> {
    at: f64,
    seq: u64,
    payload: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // reversed: BinaryHeap is a max-heap, the earliest deadline must surface first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .total_cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending one-shot timers ordered by deadline, then by scheduling order.
pub struct Timeline<T> {
    heap: BinaryHeap<Entry<T>>,
    live: HashSet<u64>,
    next_seq: u64,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashSet::new(),
            next_seq: 0,
        }
    }
}

impl<T> std::fmt::Debug for Timeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("pending", &self.live.len())
            .field("next_deadline", &self.next_deadline())
            .finish()
    }
}

impl<T> Timeline<T> {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `payload` to fire at host time `at` (ms).
    ///
    /// A NaN deadline is treated as 0 and fires on the next poll.
    pub fn schedule(&mut self, at: f64, payload: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let at = if at.is_nan() { 0.0 } else { at };
        self.heap.push(Entry { at, seq, payload });
        self.live.insert(seq);
        TimerId(seq)
    }

    /// Cancels a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.live.remove(&id.0)
    }

    /// Returns true if the timer is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.live.contains(&id.0)
    }

    /// Cancels every pending timer, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let cancelled = self.live.len();
        self.heap.clear();
        self.live.clear();
        cancelled
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<f64> {
        // cancelled entries stay in the heap until popped
        self.heap
            .iter()
            .filter(|e| self.live.contains(&e.seq))
            .map(|e| e.at)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Removes and returns the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: f64) -> Option<DueTimer<T>> {
        while let Some(top) = self.heap.peek() {
            if top.at > now {
                return None;
            }
            let entry = self.heap.pop()?;
            if self.live.remove(&entry.seq) {
                return Some(DueTimer {
                    id: TimerId(entry.seq),
                    at: entry.at,
                    payload: entry.payload,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(300.0, "c");
        timeline.schedule(100.0, "a");
        timeline.schedule(200.0, "b");

        assert!(timeline.pop_due(50.0).is_none());
        let fired: Vec<_> = std::iter::from_fn(|| timeline.pop_due(1000.0))
            .map(|t| t.payload)
            .collect();
        assert_eq!(fired, vec!["a", "b", "c"]);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut timeline = Timeline::new();
        for i in 0..5 {
            timeline.schedule(10.0, i);
        }
        let fired: Vec<_> = std::iter::from_fn(|| timeline.pop_due(10.0))
            .map(|t| t.payload)
            .collect();
        assert_eq!(fired, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_cancel() {
        let mut timeline = Timeline::new();
        let a = timeline.schedule(10.0, 'a');
        let b = timeline.schedule(20.0, 'b');
        assert!(timeline.cancel(a));
        assert!(!timeline.cancel(a));
        assert!(!timeline.is_pending(a));
        assert!(timeline.is_pending(b));
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.next_deadline(), Some(20.0));

        let due = timeline.pop_due(100.0).unwrap();
        assert_eq!(due.id, b);
        assert_eq!(due.at, 20.0);
        assert!(timeline.pop_due(100.0).is_none());
        assert!(!timeline.cancel(b));
    }

    #[test]
    fn test_clear() {
        let mut timeline = Timeline::new();
        timeline.schedule(1.0, ());
        timeline.schedule(2.0, ());
        assert_eq!(timeline.clear(), 2);
        assert!(timeline.pop_due(f64::INFINITY).is_none());
        assert_eq!(timeline.next_deadline(), None);
    }

    #[test]
    fn test_nan_deadline_fires_immediately() {
        let mut timeline = Timeline::new();
        timeline.schedule(f64::NAN, 1);
        assert_eq!(timeline.pop_due(0.0).map(|t| t.payload), Some(1));
    }
}
