//! Command-line interface: solve puzzle files, generate new puzzles.

mod render;

use std::fs;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::info;
use polydoku_core::{is_supported, Generator, Grid, Solver, SolverConfig};

use crate::render::render;

#[derive(Parser)]
#[command(name = "polydoku", version, about = "Generalized sudoku solver and generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle read from a text file
    Solve {
        /// Puzzle file in block format
        file: String,
        /// Enumerate every solution instead of stopping at the first
        #[arg(long)]
        all: bool,
        /// Propagate with a worker pool
        #[arg(long)]
        parallel: bool,
    },
    /// Generate a random puzzle
    Generate {
        /// Square base of the grid (4, 9, 16, 25, 36, 49 or 64)
        #[arg(long, default_value_t = 4)]
        base: usize,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Solve {
            file,
            all,
            parallel,
        } => solve(&file, all, parallel),
        Command::Generate { base, seed } => generate(base, seed),
    }
}

fn solve(file: &str, all: bool, parallel: bool) -> ExitCode {
    let text = match fs::read_to_string(file) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: cannot read {file}: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut grid = match Grid::parse(&text) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("error: {file}: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "parsed base-{} puzzle with {} givens",
        grid.base(),
        grid.given_count()
    );
    let solver = Solver::with_config(SolverConfig { parallel });
    if all {
        let solutions = solver.solve_all(&mut grid);
        if solutions.is_empty() {
            eprintln!("no solution ({} dead ends)", grid.fails());
            return ExitCode::FAILURE;
        }
        for (n, solution) in solutions.iter().enumerate() {
            println!("solution {}:", n + 1);
            println!("{}", render(solution));
        }
        println!(
            "{} solution(s), {} dead ends",
            solutions.len(),
            grid.fails()
        );
    } else {
        if !solver.solve(&mut grid) {
            eprintln!("no solution ({} dead ends)", grid.fails());
            return ExitCode::FAILURE;
        }
        println!("{}", render(&grid));
        println!("{} dead ends", grid.fails());
    }
    ExitCode::SUCCESS
}

fn generate(base: usize, seed: Option<u64>) -> ExitCode {
    if !is_supported(base) {
        eprintln!("error: unsupported base {base} (use 4, 9, 16, 25, 36, 49 or 64)");
        return ExitCode::FAILURE;
    }
    let mut generator = match seed {
        Some(seed) => Generator::with_seed(seed),
        None => Generator::new(),
    };
    let generated = generator.generate(base);
    println!("{}", render(&generated.grid));
    println!(
        "{} givens, {} completion(s)",
        generated.grid.given_count(),
        generated.solution_count
    );
    ExitCode::SUCCESS
}
