//! The grid model: an arena of cells plus the row/column/block index sets
//! and the queue of cells awaiting propagation.

use crate::{alphabet, Cell, Domain};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// A puzzle grid of `base * base` cells.
///
/// Cells live in a flat row-major arena; rows, columns, and blocks are index
/// sets into it, so group membership is shared without back-references. Every
/// cell belongs to exactly one row, one column, and one block, and the three
/// group families each partition the arena.
///
/// The dirty queue holds cells whose domains changed and still need to be
/// propagated; the `queued` mask keeps any cell from appearing in it twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    base: usize,
    block: usize,
    cells: Vec<Cell>,
    rows: Vec<Vec<usize>>,
    columns: Vec<Vec<usize>>,
    blocks: Vec<Vec<usize>>,
    peers: Vec<Vec<usize>>,
    dirty: VecDeque<usize>,
    queued: Vec<bool>,
    #[serde(skip)]
    fails: u64,
}

impl Grid {
    /// An all-blank grid of the given base. Every cell starts dirty, so the
    /// first propagation pass sees the whole grid.
    ///
    /// Panics when `base` is not a supported square base; that is a caller
    /// error, not an input error.
    pub fn empty(base: usize) -> Self {
        assert!(alphabet::is_supported(base), "unsupported base {base}");
        let block = (1..=8)
            .find(|k| k * k == base)
            .expect("supported bases are perfect squares");
        let n = base * base;

        let mut rows = vec![Vec::with_capacity(base); base];
        let mut columns = vec![Vec::with_capacity(base); base];
        let mut blocks = vec![Vec::with_capacity(base); base];
        for idx in 0..n {
            let (r, c) = (idx / base, idx % base);
            let b = (r / block) * block + c / block;
            rows[r].push(idx);
            columns[c].push(idx);
            blocks[b].push(idx);
        }

        let mut peers = Vec::with_capacity(n);
        for idx in 0..n {
            let (r, c) = (idx / base, idx % base);
            let b = (r / block) * block + c / block;
            let mut seen = vec![false; n];
            let mut list = Vec::new();
            for &other in rows[r].iter().chain(&columns[c]).chain(&blocks[b]) {
                if other != idx && !seen[other] {
                    seen[other] = true;
                    list.push(other);
                }
            }
            peers.push(list);
        }

        Grid {
            base,
            block,
            cells: vec![Cell::blank(base); n],
            rows,
            columns,
            blocks,
            peers,
            dirty: (0..n).collect(),
            queued: vec![true; n],
            fails: 0,
        }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    /// Side length of one block (`√base`).
    pub fn block_size(&self) -> usize {
        self.block
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Linear arena index for `(row, col)`. Panics when either coordinate is
    /// outside `0..base`.
    pub fn cell_index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.base && col < self.base,
            "coordinates ({row},{col}) out of range for base {}",
            self.base
        );
        row * self.base + col
    }

    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    pub fn cell_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    pub fn cell_at(&self, row: usize, col: usize) -> &Cell {
        &self.cells[self.cell_index(row, col)]
    }

    pub fn value_at(&self, row: usize, col: usize) -> Option<u8> {
        self.cell_at(row, col).value()
    }

    /// Fix a given value from puzzle input and mark the cell dirty.
    pub fn set_given(&mut self, row: usize, col: usize, value: u8) {
        assert!((value as usize) < self.base, "value {value} out of range");
        let idx = self.cell_index(row, col);
        self.cells[idx] = Cell::new_given(value);
        self.mark_dirty(idx);
    }

    /// Enqueue a cell for propagation unless it is already queued. Returns
    /// whether the cell was newly enqueued.
    pub(crate) fn mark_dirty(&mut self, idx: usize) -> bool {
        if self.queued[idx] {
            return false;
        }
        self.queued[idx] = true;
        self.dirty.push_back(idx);
        true
    }

    /// Pop the next dirty cell. Popping an empty queue is a no-op `None`.
    pub(crate) fn pop_dirty(&mut self) -> Option<usize> {
        let idx = self.dirty.pop_front()?;
        self.queued[idx] = false;
        Some(idx)
    }

    pub(crate) fn dirty_is_empty(&self) -> bool {
        self.dirty.is_empty()
    }

    /// Re-queue every cell, as after construction.
    pub fn mark_all_dirty(&mut self) {
        for idx in 0..self.cells.len() {
            self.mark_dirty(idx);
        }
    }

    pub(crate) fn peers(&self, idx: usize) -> &[usize] {
        &self.peers[idx]
    }

    pub(crate) fn peer_count(&self, idx: usize) -> usize {
        self.peers[idx].len()
    }

    pub(crate) fn peer(&self, idx: usize, i: usize) -> usize {
        self.peers[idx][i]
    }

    pub fn row_cells(&self, row: usize) -> &[usize] {
        &self.rows[row]
    }

    pub fn column_cells(&self, col: usize) -> &[usize] {
        &self.columns[col]
    }

    pub fn block_cells(&self, block: usize) -> &[usize] {
        &self.blocks[block]
    }

    /// Cells with no assigned value, in ascending arena order.
    pub fn unsolved_cells(&self) -> Vec<usize> {
        (0..self.cells.len())
            .filter(|&idx| self.cells[idx].value().is_none())
            .collect()
    }

    /// Whether any cell's domain has been emptied.
    pub fn has_contradiction(&self) -> bool {
        self.cells.iter().any(|cell| cell.domain().is_empty())
    }

    /// Whether every cell has an assigned value.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|cell| cell.value().is_some())
    }

    /// Whether no group holds the same assigned value twice.
    pub fn is_valid(&self) -> bool {
        let groups = self.rows.iter().chain(&self.columns).chain(&self.blocks);
        for group in groups {
            let mut seen = Domain::empty();
            for &idx in group {
                if let Some(value) = self.cells[idx].value() {
                    if seen.contains(value) {
                        return false;
                    }
                    seen.insert(value);
                }
            }
        }
        true
    }

    pub fn is_solved(&self) -> bool {
        self.is_complete() && self.is_valid()
    }

    pub fn given_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_given()).count()
    }

    /// Dead-end branches hit during the most recent solve call.
    pub fn fails(&self) -> u64 {
        self.fails
    }

    pub(crate) fn reset_fails(&mut self) {
        self.fails = 0;
    }

    pub(crate) fn note_fail(&mut self) {
        self.fails += 1;
    }
}

/// Renders the parseable block format: one character per cell (space for an
/// undetermined cell), `|` between block columns, a `-`/`+` rule between
/// block rows.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.base {
            if row != 0 && row % self.block == 0 {
                for col in 0..self.base {
                    if col != 0 && col % self.block == 0 {
                        f.write_str("+")?;
                    }
                    f.write_str("-")?;
                }
                f.write_str("\n")?;
            }
            for col in 0..self.base {
                if col != 0 && col % self.block == 0 {
                    f.write_str("|")?;
                }
                let cell = self.cell_at(row, col);
                let shown = cell.value().or_else(|| cell.domain().as_single());
                match shown {
                    Some(value) => {
                        write!(f, "{}", alphabet::value_to_char(self.base, value))?
                    }
                    None => f.write_str(" ")?,
                }
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_partition_the_arena() {
        let grid = Grid::empty(9);
        for groups in [&grid.rows, &grid.columns, &grid.blocks] {
            let mut seen = vec![false; 81];
            for group in groups.iter() {
                assert_eq!(group.len(), 9);
                for &idx in group {
                    assert!(!seen[idx], "cell {idx} in two groups of one family");
                    seen[idx] = true;
                }
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn peer_counts() {
        // 8 row + 8 column + 4 block-only peers in a 9x9 grid.
        let grid = Grid::empty(9);
        for idx in 0..81 {
            assert_eq!(grid.peers(idx).len(), 20);
        }
        let grid = Grid::empty(4);
        for idx in 0..16 {
            assert_eq!(grid.peers(idx).len(), 7);
        }
    }

    #[test]
    fn fresh_grid_is_globally_dirty() {
        let mut grid = Grid::empty(4);
        let mut popped = 0;
        while grid.pop_dirty().is_some() {
            popped += 1;
        }
        assert_eq!(popped, 16);
        assert!(grid.pop_dirty().is_none());
    }

    #[test]
    fn dirty_queue_holds_each_cell_at_most_once() {
        let mut grid = Grid::empty(4);
        while grid.pop_dirty().is_some() {}
        assert!(grid.mark_dirty(5));
        assert!(!grid.mark_dirty(5));
        assert_eq!(grid.pop_dirty(), Some(5));
        assert!(grid.pop_dirty().is_none());
        // Popping re-arms the mask.
        assert!(grid.mark_dirty(5));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_coordinates_panic() {
        let grid = Grid::empty(4);
        grid.cell_index(4, 0);
    }

    #[test]
    fn set_given_fixes_the_cell() {
        let mut grid = Grid::empty(4);
        grid.set_given(1, 2, 3);
        let cell = grid.cell_at(1, 2);
        assert!(cell.is_given());
        assert_eq!(cell.value(), Some(3));
        assert_eq!(cell.domain().as_single(), Some(3));
    }

    #[test]
    fn validity_detects_duplicates() {
        let mut grid = Grid::empty(4);
        grid.set_given(0, 0, 1);
        assert!(grid.is_valid());
        grid.set_given(0, 3, 1);
        assert!(!grid.is_valid());
        assert!(!grid.is_complete());
    }

    #[test]
    fn display_uses_block_format() {
        let mut grid = Grid::empty(4);
        grid.set_given(0, 0, 0);
        grid.set_given(3, 3, 3);
        let text = grid.to_string();
        assert_eq!(text, "1 |  \n  |  \n--+--\n  |  \n  | 4\n");
    }

    #[test]
    fn serde_roundtrip() {
        let mut grid = Grid::empty(4);
        grid.set_given(2, 1, 0);
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }
}
