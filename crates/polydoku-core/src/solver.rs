//! Backtracking search over grid configurations.
//!
//! The grid is threaded explicitly through every recursive call; each guess
//! is a scoped mutation undone on every exit path that keeps searching, so a
//! frame always hands its parent back the exact state it received.

use crate::{propagate, propagate_parallel, Diff, Domain, Grid};
use log::debug;

/// Search configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverConfig {
    /// Run each propagation pass on the worker pool instead of inline. The
    /// search itself stays single-threaded.
    pub parallel: bool,
}

/// Backtracking search engine: most-constrained-variable selection,
/// least-constraining-value ordering, propagation after every guess, and
/// diff reversal on failure. Stateless between calls; per-solve counters
/// live on the grid.
pub struct Solver {
    config: SolverConfig,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Solver {
            config: SolverConfig::default(),
        }
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Solver { config }
    }

    /// Solve in place. On success the grid holds the solution and `true` is
    /// returned; on failure the grid is left partially reverted but
    /// consistent (the initial propagation pass is not undone) and the
    /// `fails` counter reports the dead ends hit.
    pub fn solve(&self, grid: &mut Grid) -> bool {
        grid.reset_fails();
        self.propagate_pass(grid);
        let mut state = SearchState::single();
        let found = self.search(grid, &mut state);
        debug!("solve: found={found} fails={}", grid.fails());
        found
    }

    /// Enumerate every completion as cloned snapshots. The input grid is
    /// fully restored before returning.
    pub fn solve_all(&self, grid: &mut Grid) -> Vec<Grid> {
        grid.reset_fails();
        self.propagate_pass(grid);
        let mut state = SearchState::complete(usize::MAX);
        self.search(grid, &mut state);
        debug!(
            "solve_all: {} solutions, fails={}",
            state.solutions.len(),
            grid.fails()
        );
        state.solutions
    }

    /// Count completions up to `limit` without disturbing the input grid.
    pub fn count_solutions(&self, grid: &Grid, limit: usize) -> usize {
        let mut working = grid.clone();
        working.reset_fails();
        self.propagate_pass(&mut working);
        let mut state = SearchState::complete(limit);
        self.search(&mut working, &mut state);
        state.solutions.len()
    }

    pub fn has_unique_solution(&self, grid: &Grid) -> bool {
        self.count_solutions(grid, 2) == 1
    }

    fn propagate_pass(&self, grid: &mut Grid) -> Diff {
        if self.config.parallel {
            propagate_parallel(grid)
        } else {
            propagate(grid)
        }
    }

    /// One search step. Returns `true` to abort the traversal: in single
    /// mode a solution was found and stays committed in the grid; in
    /// complete mode the solution limit was reached.
    fn search(&self, grid: &mut Grid, state: &mut SearchState) -> bool {
        // An emptied domain anywhere is a dead end. This also covers wiped
        // solved cells (contradictory givens), which the unsolved set below
        // would never surface.
        if grid.has_contradiction() {
            grid.note_fail();
            return false;
        }

        let Some(cell) = self.most_constrained(grid) else {
            // Every cell is assigned: a solution.
            if state.complete {
                state.solutions.push(grid.clone());
                return state.solutions.len() >= state.limit;
            }
            return true;
        };

        let entry_domain = grid.cell(cell).domain();
        for value in self.ranked_candidates(grid, cell, entry_domain) {
            grid.cell_mut(cell).assign(value);
            grid.mark_dirty(cell);
            let diff = self.propagate_pass(grid);
            if self.search(grid, state) {
                // Aborting: leave the committed state in place.
                return true;
            }
            diff.revert(grid);
        }

        // Exhausted every candidate: hand the parent back the domain this
        // frame was entered with, not an empty one.
        let cell_ref = grid.cell_mut(cell);
        cell_ref.clear_value();
        cell_ref.set_domain(entry_domain);
        false
    }

    /// MRV selection: the unsolved cell with the smallest domain, ties
    /// broken by ascending arena index.
    fn most_constrained(&self, grid: &Grid) -> Option<usize> {
        grid.unsolved_cells()
            .into_iter()
            .min_by_key(|&idx| grid.cell(idx).domain().count())
    }

    /// Least-constraining-value order: trial-restrict the cell to each
    /// candidate, propagate, count the removals caused elsewhere, reverse
    /// the trial, and rank ascending. Ranked once from the entry domain;
    /// ties broken by ascending value.
    fn ranked_candidates(&self, grid: &mut Grid, cell: usize, domain: Domain) -> Vec<u8> {
        if domain.count() <= 1 {
            return domain.iter().collect();
        }
        let mut scored: Vec<(usize, u8)> = Vec::with_capacity(domain.count());
        for value in domain.iter() {
            grid.cell_mut(cell).set_domain(Domain::single(value));
            grid.mark_dirty(cell);
            let diff = self.propagate_pass(grid);
            scored.push((diff.removals(), value));
            diff.revert(grid);
            grid.cell_mut(cell).set_domain(domain);
        }
        scored.sort_unstable();
        scored.into_iter().map(|(_, value)| value).collect()
    }
}

struct SearchState {
    complete: bool,
    limit: usize,
    solutions: Vec<Grid>,
}

impl SearchState {
    fn single() -> Self {
        SearchState {
            complete: false,
            limit: usize::MAX,
            solutions: Vec::new(),
        }
    }

    fn complete(limit: usize) -> Self {
        SearchState {
            complete: true,
            limit,
            solutions: Vec::new(),
        }
    }
}
