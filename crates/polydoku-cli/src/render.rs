//! Terminal rendering of grid state.

use crossterm::style::Stylize;
use polydoku_core::{value_to_char, Grid};

/// Render a grid with block dividers: givens green, propagation-forced
/// values red, everything else plain, undetermined cells as `.`.
pub fn render(grid: &Grid) -> String {
    let base = grid.base();
    let block = grid.block_size();
    let mut out = String::new();
    for row in 0..base {
        if row != 0 && row % block == 0 {
            let band = "-".repeat(3 * block);
            out.push_str(&vec![band; block].join("+"));
            out.push('\n');
        }
        for col in 0..base {
            if col != 0 && col % block == 0 {
                out.push('|');
            }
            out.push(' ');
            out.push_str(&glyph(grid, row, col));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn glyph(grid: &Grid, row: usize, col: usize) -> String {
    let base = grid.base();
    let cell = grid.cell_at(row, col);
    if let Some(value) = cell.value() {
        let ch = value_to_char(base, value);
        if cell.is_given() {
            ch.green().to_string()
        } else {
            ch.to_string()
        }
    } else if let Some(value) = cell.domain().as_single() {
        value_to_char(base, value).red().to_string()
    } else {
        ".".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_cell_with_dividers() {
        let grid = Grid::empty(4);
        let text = render(&grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "------+------");
        assert_eq!(text.matches('.').count(), 16);
    }

    #[test]
    fn givens_are_styled() {
        let mut grid = Grid::empty(4);
        grid.set_given(0, 0, 0);
        let text = render(&grid);
        // Styled output carries an escape sequence around the given.
        assert!(text.contains('1'));
        assert!(text.contains('\u{1b}'));
    }
}
