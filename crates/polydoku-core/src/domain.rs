//! Candidate-set representation.
//!
//! Every supported base fits in one machine word (4..64 values), so a domain
//! is a `u64` bitset and every operation is a handful of bit instructions.

use serde::{Deserialize, Serialize};

/// The set of values a cell may still take, one bit per value in `0..base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Domain(u64);

impl Domain {
    /// The empty set. An empty domain signals a local contradiction.
    pub fn empty() -> Self {
        Domain(0)
    }

    /// Every value admissible for a grid of the given base.
    pub fn full(base: usize) -> Self {
        debug_assert!((1..=64).contains(&base));
        if base == 64 {
            Domain(u64::MAX)
        } else {
            Domain((1u64 << base) - 1)
        }
    }

    /// The singleton `{value}`.
    pub fn single(value: u8) -> Self {
        Domain(1u64 << value)
    }

    pub fn contains(&self, value: u8) -> bool {
        self.0 & (1u64 << value) != 0
    }

    pub fn insert(&mut self, value: u8) {
        self.0 |= 1u64 << value;
    }

    pub fn remove(&mut self, value: u8) {
        self.0 &= !(1u64 << value);
    }

    /// Number of values remaining.
    pub fn count(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// `Some(v)` exactly when the set is `{v}`.
    pub fn as_single(&self) -> Option<u8> {
        if self.0 != 0 && self.0 & (self.0 - 1) == 0 {
            Some(self.0.trailing_zeros() as u8)
        } else {
            None
        }
    }

    /// Union `other` into this set. Reverting recorded removals is a union,
    /// so domains only ever grow under reversal.
    pub fn union(&mut self, other: Domain) {
        self.0 |= other.0;
    }

    /// Values in ascending order.
    pub fn iter(self) -> DomainIter {
        DomainIter(self.0)
    }
}

/// Iterator over the values of a [`Domain`], ascending.
pub struct DomainIter(u64);

impl Iterator for DomainIter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 {
            return None;
        }
        let value = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_has_base_values() {
        assert_eq!(Domain::full(4).count(), 4);
        assert_eq!(Domain::full(9).count(), 9);
        assert_eq!(Domain::full(64).count(), 64);
    }

    #[test]
    fn single_roundtrip() {
        let d = Domain::single(7);
        assert_eq!(d.count(), 1);
        assert_eq!(d.as_single(), Some(7));
        assert!(d.contains(7));
        assert!(!d.contains(6));
    }

    #[test]
    fn as_single_rejects_wider_sets() {
        assert_eq!(Domain::empty().as_single(), None);
        assert_eq!(Domain::full(4).as_single(), None);
    }

    #[test]
    fn remove_and_union_are_inverses() {
        let mut d = Domain::full(9);
        let mut removed = Domain::empty();
        for v in [2u8, 5, 8] {
            d.remove(v);
            removed.insert(v);
        }
        assert_eq!(d.count(), 6);
        d.union(removed);
        assert_eq!(d, Domain::full(9));
    }

    #[test]
    fn iter_ascending() {
        let mut d = Domain::empty();
        d.insert(3);
        d.insert(0);
        d.insert(8);
        let values: Vec<u8> = d.iter().collect();
        assert_eq!(values, vec![0, 3, 8]);
    }
}
