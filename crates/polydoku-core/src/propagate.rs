//! Constraint propagation: directed arc consistency over the dirty queue.
//!
//! Only a cell whose domain has collapsed to a single value can eliminate
//! candidates elsewhere — a singleton neighbor forbids that exact value
//! everywhere in its row, column, and block. That restricted check is
//! complete for the all-different decomposition, and termination follows
//! because domains only ever shrink.

use crate::{Diff, Grid};
use log::trace;
use std::sync::{Condvar, Mutex};
use std::thread;

/// Reduce every domain to the all-different fixed point, recording each
/// removal. The dirty queue is empty on return.
///
/// A domain reaching size zero is not an error here; the caller interprets
/// it as a local contradiction.
pub fn propagate(grid: &mut Grid) -> Diff {
    let mut diff = Diff::new();
    while let Some(dirty) = grid.pop_dirty() {
        let Some(value) = grid.cell(dirty).domain().as_single() else {
            continue;
        };
        for i in 0..grid.peer_count(dirty) {
            let peer = grid.peer(dirty, i);
            if grid.cell(peer).domain().contains(value) {
                grid.cell_mut(peer).remove_candidate(value);
                diff.record(peer, value);
                grid.mark_dirty(peer);
            }
        }
    }
    trace!("propagation removed {} candidates", diff.removals());
    diff
}

/// Worker-pool state shared behind one mutex: the grid (queue included), the
/// diff under construction, and the count of workers mid-cell.
struct Shared<'a> {
    grid: &'a mut Grid,
    diff: Diff,
    active: usize,
}

/// [`propagate`] on a pool sized to the available hardware parallelism.
pub fn propagate_parallel(grid: &mut Grid) -> Diff {
    let workers = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    propagate_parallel_with(grid, workers)
}

/// Concurrent propagation with an explicit worker count.
///
/// Workers pop cells from the shared dirty queue; pop-and-dequeue, each
/// domain removal, and each diff insertion happen under the shared lock, and
/// idle workers block on a condition variable rather than spinning. The pass
/// is over only when the queue is empty AND no worker is still mid-cell — a
/// worker about to enqueue fresh dirty cells must not be mistaken for a
/// fixed point. Runs to completion; there is no cancellation.
pub fn propagate_parallel_with(grid: &mut Grid, workers: usize) -> Diff {
    if workers <= 1 {
        return propagate(grid);
    }
    let shared = Mutex::new(Shared {
        grid,
        diff: Diff::new(),
        active: 0,
    });
    let idle = Condvar::new();

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                let mut guard = shared.lock().unwrap();
                loop {
                    if let Some(dirty) = guard.grid.pop_dirty() {
                        let Some(value) = guard.grid.cell(dirty).domain().as_single() else {
                            continue;
                        };
                        guard.active += 1;
                        let peers = guard.grid.peers(dirty).to_vec();
                        drop(guard);

                        // Domains only shrink, so a snapshot singleton stays
                        // authoritative; each peer update re-checks its own
                        // domain under the lock.
                        for peer in peers {
                            let mut locked = shared.lock().unwrap();
                            if locked.grid.cell(peer).domain().contains(value) {
                                locked.grid.cell_mut(peer).remove_candidate(value);
                                locked.diff.record(peer, value);
                                if locked.grid.mark_dirty(peer) {
                                    idle.notify_one();
                                }
                            }
                        }

                        guard = shared.lock().unwrap();
                        guard.active -= 1;
                        if guard.active == 0 && guard.grid.dirty_is_empty() {
                            idle.notify_all();
                        }
                    } else if guard.active == 0 {
                        idle.notify_all();
                        break;
                    } else {
                        guard = idle.wait(guard).unwrap();
                    }
                }
            });
        }
    });

    shared.into_inner().unwrap().diff
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domains(grid: &Grid) -> Vec<crate::Domain> {
        (0..grid.cell_count()).map(|i| grid.cell(i).domain()).collect()
    }

    // A solved base-4 grid with (1,2) blanked; three groups already pin it.
    const NEARLY_SOLVED: &str = "12|34\n34| 2\n--+--\n21|43\n43|21\n";

    #[test]
    fn single_blank_resolves_by_propagation_alone() {
        let mut grid = Grid::parse(NEARLY_SOLVED).unwrap();
        propagate(&mut grid);
        let idx = grid.cell_index(1, 2);
        // '1' is value 0 in the base-4 alphabet.
        assert_eq!(grid.cell(idx).domain().as_single(), Some(0));
        assert!(!grid.has_contradiction());
    }

    #[test]
    fn propagation_is_idempotent() {
        let mut grid = Grid::parse(NEARLY_SOLVED).unwrap();
        propagate(&mut grid);
        let snapshot = grid.clone();
        let second = propagate(&mut grid);
        assert!(second.is_empty());
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn diff_reverses_exactly() {
        let mut grid = Grid::parse(NEARLY_SOLVED).unwrap();
        let before = domains(&grid);
        let diff = propagate(&mut grid);
        assert!(!diff.is_empty());
        assert_ne!(domains(&grid), before);
        diff.revert(&mut grid);
        assert_eq!(domains(&grid), before);
    }

    #[test]
    fn duplicate_givens_wipe_a_domain() {
        let mut grid = Grid::empty(4);
        grid.set_given(0, 0, 1);
        grid.set_given(0, 3, 1);
        propagate(&mut grid);
        assert!(grid.has_contradiction());
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut sequential = Grid::parse(NEARLY_SOLVED).unwrap();
        let mut parallel = Grid::parse(NEARLY_SOLVED).unwrap();
        let a = propagate(&mut sequential);
        let b = propagate_parallel_with(&mut parallel, 4);
        assert_eq!(domains(&sequential), domains(&parallel));
        assert_eq!(a.removals(), b.removals());
        assert!(parallel.dirty_is_empty());
    }

    #[test]
    fn parallel_pop_on_empty_queue_is_a_no_op() {
        let mut grid = Grid::parse(NEARLY_SOLVED).unwrap();
        propagate(&mut grid);
        let diff = propagate_parallel_with(&mut grid, 4);
        assert!(diff.is_empty());
    }
}
