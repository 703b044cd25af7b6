//! Bounded element pools.

use std::fmt;

use flyby_core::ElementContent;
use flyby_motion::Flight;

use crate::id::ElementId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two element families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PoolKind {
    /// Social media cards.
    Social,
    /// Emoji glyphs.
    Emoji,
}

impl PoolKind {
    /// Both kinds, in update order.
    pub const ALL: [PoolKind; 2] = [PoolKind::Social, PoolKind::Emoji];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            PoolKind::Social => "social",
            PoolKind::Emoji => "emoji",
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A live element's identity and what it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Element {
    /// Unique id among live elements.
    pub id: ElementId,
    /// Card or glyph.
    pub content: ElementContent,
}

/// An element together with its animation.
#[derive(Debug, Clone)]
pub struct Member {
    /// The element.
    pub element: Element,
    /// Its flight.
    pub flight: Flight,
}

/// Why [`Pool::insert`] refused an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertRejected {
    /// The pool is at capacity.
    Full,
    /// An element with this id is already live.
    DuplicateId,
}

/// A bounded set of live elements of one kind, in spawn order.
#[derive(Debug, Clone)]
pub struct Pool {
    kind: PoolKind,
    capacity: usize,
    members: Vec<Member>,
}

impl Pool {
    /// Creates an empty pool.
    pub fn new(kind: PoolKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            members: Vec::with_capacity(capacity),
        }
    }

    pub fn kind(&self) -> PoolKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    /// Slots left before the pool is full.
    pub fn vacancies(&self) -> usize {
        self.capacity.saturating_sub(self.members.len())
    }

    /// Adds a member unless the pool is full or the id is taken.
    pub fn insert(&mut self, member: Member) -> Result<(), InsertRejected> {
        if self.is_full() {
            return Err(InsertRejected::Full);
        }
        if self.contains(member.element.id) {
            return Err(InsertRejected::DuplicateId);
        }
        self.members.push(member);
        Ok(())
    }

    /// Removes and returns the member with `id`.
    pub fn remove(&mut self, id: ElementId) -> Option<Member> {
        let index = self.members.iter().position(|m| m.element.id == id)?;
        Some(self.members.remove(index))
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.members.iter().any(|m| m.element.id == id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Member> {
        self.members.iter().find(|m| m.element.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub(crate) fn members_mut(&mut self) -> impl Iterator<Item = &mut Member> {
        self.members.iter_mut()
    }

    /// Drops every member, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let evicted = self.members.len();
        self.members.clear();
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyby_core::{FlybyRng, Glyph, Viewport};
    use flyby_motion::FlightPreset;

    fn member(serial: u32) -> Member {
        let mut rng = FlybyRng::new(u64::from(serial) + 1);
        Member {
            element: Element {
                id: ElementId { epoch: 0, serial },
                content: ElementContent::Emoji(Glyph::Fire),
            },
            flight: Flight::spawn(&FlightPreset::emoji(), Viewport::default(), 0.0, &mut rng),
        }
    }

    #[test]
    fn test_capacity_enforced() {
        let mut pool = Pool::new(PoolKind::Emoji, 2);
        assert!(pool.insert(member(0)).is_ok());
        assert!(pool.insert(member(1)).is_ok());
        assert!(pool.is_full());
        assert_eq!(pool.insert(member(2)), Err(InsertRejected::Full));
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.vacancies(), 0);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut pool = Pool::new(PoolKind::Social, 3);
        pool.insert(member(4)).unwrap();
        assert_eq!(pool.insert(member(4)), Err(InsertRejected::DuplicateId));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut pool = Pool::new(PoolKind::Social, 3);
        for i in 0..3 {
            pool.insert(member(i)).unwrap();
        }
        let id = ElementId { epoch: 0, serial: 1 };
        assert_eq!(pool.get(id).map(|m| m.element.id), Some(id));
        assert!(pool.remove(id).is_some());
        assert!(pool.get(id).is_none());
        assert!(!pool.contains(id));
        assert!(pool.remove(id).is_none());
        let order: Vec<u32> = pool.iter().map(|m| m.element.id.serial).collect();
        assert_eq!(order, vec![0, 2]);
        assert_eq!(pool.clear(), 2);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(PoolKind::Social.to_string(), "social");
        assert_eq!(PoolKind::Emoji.to_string(), "emoji");
    }
}
