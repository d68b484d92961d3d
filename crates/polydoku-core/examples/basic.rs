//! Basic example of using the polydoku engine.

use polydoku_core::{Generator, Grid, Solver};

fn main() {
    // Generate a seeded base-4 puzzle.
    println!("Generating a base-4 puzzle...\n");
    let mut generator = Generator::new();
    let generated = generator.generate(4);
    println!("{}", generated.grid);
    println!("Given cells: {}", generated.grid.given_count());
    println!("Completions: {}", generated.solution_count);

    let solver = Solver::new();
    let mut grid = generated.grid.clone();
    if solver.solve(&mut grid) {
        println!("\nOne solution:\n{grid}");
    }

    // Parse a puzzle from the block text format.
    println!("--- Parsing a puzzle from text ---\n");
    let text = "1 | 4\n 4|  \n--+--\n  |  \n41|23\n";
    let mut parsed = Grid::parse(text).expect("well-formed puzzle");
    println!("{parsed}");
    if solver.solve(&mut parsed) {
        println!("Solved:\n{parsed}");
        println!("Dead ends: {}", parsed.fails());
    } else {
        println!("No solution ({} dead ends)", parsed.fails());
    }
}
