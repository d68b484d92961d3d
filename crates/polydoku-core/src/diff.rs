//! Reversible record of the domain removals from one propagation pass.

use crate::{Domain, Grid};
use std::collections::HashMap;

/// Every value removed from every cell during a single propagation call.
///
/// Reversal unions each cell's removed values back into its current domain,
/// so the order removals were recorded in is immaterial and domains only
/// grow on reversal. A diff is consumed by exactly one [`Diff::revert`];
/// double reversal is unsupported.
#[derive(Debug, Default)]
pub struct Diff {
    removed: HashMap<usize, Domain>,
    removals: usize,
}

impl Diff {
    pub fn new() -> Self {
        Diff::default()
    }

    /// Record that `value` was removed from `cell`'s domain.
    pub(crate) fn record(&mut self, cell: usize, value: u8) {
        let entry = self.removed.entry(cell).or_insert_with(Domain::empty);
        debug_assert!(!entry.contains(value), "value removed twice from one cell");
        entry.insert(value);
        self.removals += 1;
    }

    /// Total removals recorded. The search engine ranks candidate values by
    /// how few removals their trial propagation caused.
    pub fn removals(&self) -> usize {
        self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.removals == 0
    }

    /// Restore every recorded value to its cell's domain. Touches neither
    /// the dirty queue nor assigned values; callers reset those separately
    /// when backtracking a guess.
    pub fn revert(self, grid: &mut Grid) {
        for (cell, values) in self.removed {
            grid.cell_mut(cell).restore_candidates(values);
        }
    }
}
