//! Puzzle generation: random seeding plus propagation, validated by the
//! search engine in complete mode.

use crate::{propagate, Grid, Solver};
use log::debug;

/// A generated puzzle and the number of distinct completions it admits,
/// reported for diagnostics.
#[derive(Debug, Clone)]
pub struct Generated {
    pub grid: Grid,
    pub solution_count: usize,
}

/// Seeds puzzles with one random placement per alphabet value.
pub struct Generator {
    rng: SimpleRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Generator {
            rng: SimpleRng::new(),
        }
    }

    /// A generator with a fixed seed, for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        Generator {
            rng: SimpleRng::with_seed(seed),
        }
    }

    /// Generate a partially filled grid of the given base: one given per
    /// alphabet value, placed at a random cell whose domain still admits it,
    /// propagating after each placement. The completion count comes from the
    /// search engine in complete mode, which can be expensive above base 4.
    ///
    /// Panics when `base` is not a supported square base.
    pub fn generate(&mut self, base: usize) -> Generated {
        let grid = loop {
            if let Some(grid) = self.seed_grid(base) {
                break grid;
            }
            debug!("seeding left a value with no admissible cell, restarting");
        };
        let mut working = grid.clone();
        let solutions = Solver::new().solve_all(&mut working);
        debug!(
            "generated base-{base} puzzle with {} completions",
            solutions.len()
        );
        Generated {
            grid,
            solution_count: solutions.len(),
        }
    }

    /// One placement per value. `None` when a value has no admissible empty
    /// cell left, which the caller answers by restarting from scratch.
    fn seed_grid(&mut self, base: usize) -> Option<Grid> {
        let mut grid = Grid::empty(base);
        propagate(&mut grid);
        for value in 0..base as u8 {
            let open: Vec<usize> = grid
                .unsolved_cells()
                .into_iter()
                .filter(|&idx| grid.cell(idx).domain().contains(value))
                .collect();
            if open.is_empty() {
                return None;
            }
            let idx = open[self.rng.next_usize(open.len())];
            grid.set_given(idx / base, idx % base, value);
            propagate(&mut grid);
        }
        Some(grid)
    }
}

/// Small seeded PRNG (PCG output function over an LCG state).
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
            // Fallback: a static counter still yields distinct streams.
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        });
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    fn with_seed(seed: u64) -> Self {
        SimpleRng {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        xorshifted.rotate_right(rot) as u64
    }

    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_one_given_per_value() {
        let mut generator = Generator::with_seed(42);
        let generated = generator.generate(4);
        assert_eq!(generated.grid.given_count(), 4);
        assert!(!generated.grid.has_contradiction());
        let mut seen = vec![false; 4];
        for i in 0..generated.grid.cell_count() {
            if let Some(v) = generated.grid.cell(i).value() {
                seen[v as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn reports_the_completion_count() {
        let mut generator = Generator::with_seed(42);
        let generated = generator.generate(4);
        let mut working = generated.grid.clone();
        let solutions = Solver::new().solve_all(&mut working);
        assert_eq!(generated.solution_count, solutions.len());
        assert!(generated.solution_count <= 288);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let first = Generator::with_seed(7).generate(4);
        let second = Generator::with_seed(7).generate(4);
        for i in 0..first.grid.cell_count() {
            assert_eq!(first.grid.cell(i).value(), second.grid.cell(i).value());
        }
        assert_eq!(first.solution_count, second.solution_count);
    }

    #[test]
    fn distinct_seeds_give_distinct_streams() {
        let mut first = SimpleRng::with_seed(1);
        let mut second = SimpleRng::with_seed(2);
        assert_ne!(first.next_u64(), second.next_u64());
        let mut replay = SimpleRng::with_seed(1);
        let mut original = SimpleRng::with_seed(1);
        for _ in 0..8 {
            assert_eq!(original.next_u64(), replay.next_u64());
        }
    }
}
