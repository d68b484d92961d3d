use crate::Domain;
use serde::{Deserialize, Serialize};

/// A single cell: an optional assigned value, the candidate domain, and a
/// flag marking values fixed by the puzzle input.
///
/// A given cell's domain is always exactly `{value}`; search never revises
/// it. Propagation may still empty a given's domain, which is how a
/// contradictory puzzle announces itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    value: Option<u8>,
    domain: Domain,
    given: bool,
}

impl Cell {
    pub(crate) fn blank(base: usize) -> Self {
        Cell {
            value: None,
            domain: Domain::full(base),
            given: false,
        }
    }

    pub(crate) fn new_given(value: u8) -> Self {
        Cell {
            value: Some(value),
            domain: Domain::single(value),
            given: true,
        }
    }

    pub fn value(&self) -> Option<u8> {
        self.value
    }

    pub fn is_given(&self) -> bool {
        self.given
    }

    pub fn is_solved(&self) -> bool {
        self.value.is_some()
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub(crate) fn set_domain(&mut self, domain: Domain) {
        self.domain = domain;
    }

    pub(crate) fn remove_candidate(&mut self, value: u8) {
        self.domain.remove(value);
    }

    /// Union previously removed values back into the domain.
    pub(crate) fn restore_candidates(&mut self, removed: Domain) {
        self.domain.union(removed);
    }

    /// Commit a guess: assign the value and collapse the domain to it.
    pub(crate) fn assign(&mut self, value: u8) {
        self.value = Some(value);
        self.domain = Domain::single(value);
    }

    pub(crate) fn clear_value(&mut self) {
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cell_has_full_domain() {
        let cell = Cell::blank(9);
        assert_eq!(cell.value(), None);
        assert!(!cell.is_given());
        assert_eq!(cell.domain().count(), 9);
    }

    #[test]
    fn given_cell_is_singleton() {
        let cell = Cell::new_given(3);
        assert_eq!(cell.value(), Some(3));
        assert!(cell.is_given());
        assert_eq!(cell.domain().as_single(), Some(3));
    }

    #[test]
    fn assign_collapses_domain() {
        let mut cell = Cell::blank(4);
        cell.assign(2);
        assert_eq!(cell.value(), Some(2));
        assert_eq!(cell.domain().as_single(), Some(2));
        cell.clear_value();
        assert_eq!(cell.value(), None);
    }
}
