//! Generalized sudoku constraint engine.
//!
//! Solves and generates sudoku-style all-different grids for square bases 4
//! through 64. The engine couples directed arc-consistency propagation over
//! a dirty-cell queue with MRV/LCV backtracking search; every propagation
//! pass returns a reversible [`Diff`], so failed guesses roll back exactly.
//!
//! ```
//! use polydoku_core::{Grid, Solver};
//!
//! let mut grid = Grid::parse("1 | 4\n 4|  \n--+--\n  |  \n41|23\n").unwrap();
//! let solver = Solver::new();
//! assert!(solver.solve(&mut grid));
//! assert!(grid.is_solved());
//! ```

mod alphabet;
mod cell;
mod diff;
mod domain;
mod generator;
mod grid;
mod parse;
mod propagate;
mod solver;

pub use alphabet::{alphabet, char_to_value, is_supported, value_to_char};
pub use cell::Cell;
pub use diff::Diff;
pub use domain::{Domain, DomainIter};
pub use generator::{Generated, Generator};
pub use grid::Grid;
pub use parse::ParseError;
pub use propagate::{propagate, propagate_parallel, propagate_parallel_with};
pub use solver::{Solver, SolverConfig};
