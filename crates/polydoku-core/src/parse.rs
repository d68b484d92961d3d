//! Puzzle text parsing.
//!
//! The block format is a square text layout whose base is inferred from the
//! line count: a base with block size `k` has `k² + k − 1` lines (content
//! rows plus one divider rule between each band of blocks). Divider
//! characters (`|`, `-`, `+`) are stripped, not counted as cells; a space is
//! a blank cell; anything else must be an alphabet character for the base.

use crate::{alphabet, Grid};
use std::fmt;

const DIVIDERS: &str = "|-+";

/// Errors produced while reading puzzle text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line count corresponds to no supported base.
    BadDimensions { lines: usize },
    /// Single-line form whose length is not the square of a supported base.
    BadLength { len: usize },
    /// The inferred base has no alphabet.
    UnsupportedBase { base: usize },
    /// A line carries more characters than the grid is wide.
    LineTooLong { line: usize, len: usize, max: usize },
    /// A character outside the base's alphabet.
    InvalidCharacter { ch: char, row: usize, col: usize },
    /// A divider character away from a block boundary.
    MisplacedDivider { row: usize, col: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BadDimensions { lines } => {
                write!(f, "{lines} lines do not form a supported grid")
            }
            ParseError::BadLength { len } => {
                write!(f, "{len} characters do not form a supported grid")
            }
            ParseError::UnsupportedBase { base } => write!(f, "base {base} is not supported"),
            ParseError::LineTooLong { line, len, max } => {
                write!(f, "line {line} has {len} characters, expected at most {max}")
            }
            ParseError::InvalidCharacter { ch, row, col } => {
                write!(f, "character {ch:?} at ({row},{col}) is not valid for this base")
            }
            ParseError::MisplacedDivider { row, col } => {
                write!(f, "unexpected divider near ({row},{col})")
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl Grid {
    /// Parse the block puzzle format. The returned grid has every given cell
    /// fixed to a singleton domain and every cell queued for propagation.
    ///
    /// ```
    /// use polydoku_core::Grid;
    ///
    /// let grid = Grid::parse("1 | 4\n 4|  \n--+--\n  |  \n41|23\n").unwrap();
    /// assert_eq!(grid.base(), 4);
    /// assert_eq!(grid.given_count(), 7);
    /// ```
    pub fn parse(text: &str) -> Result<Grid, ParseError> {
        let mut lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        while lines.last() == Some(&"") {
            lines.pop();
        }
        let count = lines.len();
        let block = (2..=8)
            .find(|k| k * k + k - 1 == count)
            .ok_or(ParseError::BadDimensions { lines: count })?;
        let base = block * block;
        if !alphabet::is_supported(base) {
            return Err(ParseError::UnsupportedBase { base });
        }
        let width = base + block - 1;

        let mut grid = Grid::empty(base);
        let mut row = 0;
        for (line_no, raw) in lines.iter().enumerate() {
            let len = raw.chars().count();
            if len > width {
                return Err(ParseError::LineTooLong {
                    line: line_no,
                    len,
                    max: width,
                });
            }
            let mut col = 0;
            let mut saw_cell = false;
            let mut saw_divider = false;
            for ch in raw.chars() {
                if DIVIDERS.contains(ch) {
                    if row % block == 0 || col % block == 0 {
                        saw_divider = true;
                        continue;
                    }
                    return Err(ParseError::MisplacedDivider { row, col });
                }
                if row >= base || col >= base {
                    return Err(ParseError::BadDimensions { lines: count });
                }
                if ch != ' ' {
                    match alphabet::char_to_value(base, ch) {
                        Some(value) => grid.set_given(row, col, value),
                        None => return Err(ParseError::InvalidCharacter { ch, row, col }),
                    }
                }
                col += 1;
                saw_cell = true;
            }
            // A line consumed entirely by dividers is a rule between block
            // bands and does not advance the row index. Short content lines
            // are padded with blanks.
            if saw_cell || !saw_divider {
                row += 1;
            }
        }
        if row != base {
            return Err(ParseError::BadDimensions { lines: count });
        }
        Ok(grid)
    }

    /// Parse a divider-free one-line form of length `base²`. Blank cells are
    /// `.`, space, or `0` when `0` is not in the base's alphabet.
    pub fn from_line(text: &str) -> Result<Grid, ParseError> {
        let chars: Vec<char> = text.trim().chars().collect();
        let len = chars.len();
        let base = [4usize, 9, 16, 25, 36, 49, 64]
            .into_iter()
            .find(|b| b * b == len)
            .ok_or(ParseError::BadLength { len })?;

        let mut grid = Grid::empty(base);
        for (i, &ch) in chars.iter().enumerate() {
            let (row, col) = (i / base, i % base);
            let blank =
                ch == '.' || ch == ' ' || (ch == '0' && alphabet::char_to_value(base, '0').is_none());
            if blank {
                continue;
            }
            match alphabet::char_to_value(base, ch) {
                Some(value) => grid.set_given(row, col, value),
                None => return Err(ParseError::InvalidCharacter { ch, row, col }),
            }
        }
        Ok(grid)
    }
}
