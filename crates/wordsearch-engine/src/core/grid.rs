use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, InvalidSides};

/// Minimum acceptable length for a grid side.
pub const MIN_SIDE_LEN: usize = 5;
/// Maximum acceptable length for a grid side.
pub const MAX_SIDE_LEN: usize = 12;

fn is_valid_side(len: usize) -> bool {
    (MIN_SIDE_LEN..=MAX_SIDE_LEN).contains(&len)
}

/// Returns `true` for letters of the Latin script.
///
/// Covers ASCII letters plus the Latin-1 Supplement, Latin Extended-A/B and
/// Latin Extended Additional blocks. `×` and `÷` live in Latin-1 but are not
/// alphabetic, so they are rejected.
///
/// This is narrower than the full Unicode Latin script: the ordinal
/// indicators `ª` and `º`, IPA Extensions, Latin Extended-C/D/E and
/// fullwidth Latin letters all count as separators.
#[must_use]
pub fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || (matches!(c, '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}') && c.is_alphabetic())
}

/// A cell coordinate, 0-indexed from the top-left corner.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({line}, {col})")]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// A single uppercase Latin letter stored in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub struct Cell(char);

impl Cell {
    /// Creates a cell holding `letter`.
    ///
    /// Returns `None` unless `letter` is a Latin letter without a lowercase form.
    #[must_use]
    pub fn new(letter: char) -> Option<Self> {
        (is_latin_letter(letter) && !letter.is_lowercase()).then_some(Self(letter))
    }

    #[must_use]
    pub const fn letter(self) -> char {
        self.0
    }
}

/// Validated grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions", into = "RawDimensions")]
pub struct Dimensions {
    lines: usize,
    cols: usize,
}

#[derive(Serialize, Deserialize)]
struct RawDimensions {
    lines: usize,
    cols: usize,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = ConfigError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Self::new(raw.lines, raw.cols)
    }
}

impl From<Dimensions> for RawDimensions {
    fn from(dims: Dimensions) -> Self {
        Self {
            lines: dims.lines,
            cols: dims.cols,
        }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            lines: MIN_SIDE_LEN,
            cols: MIN_SIDE_LEN,
        }
    }
}

impl Dimensions {
    /// Checks both sides against [`MIN_SIDE_LEN`]..=[`MAX_SIDE_LEN`].
    ///
    /// The error names every side that is out of range.
    pub fn new(lines: usize, cols: usize) -> Result<Self, ConfigError> {
        let sides = match (is_valid_side(lines), is_valid_side(cols)) {
            (true, true) => return Ok(Self { lines, cols }),
            (false, true) => InvalidSides::Lines,
            (true, false) => InvalidSides::Cols,
            (false, false) => InvalidSides::Both,
        };
        Err(ConfigError::InvalidDimensions { sides })
    }

    #[must_use]
    pub const fn lines(&self) -> usize {
        self.lines
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub fn with_lines(self, lines: usize) -> Result<Self, ConfigError> {
        if !is_valid_side(lines) {
            return Err(ConfigError::InvalidDimensions {
                sides: InvalidSides::Lines,
            });
        }
        Ok(Self { lines, ..self })
    }

    pub fn with_cols(self, cols: usize) -> Result<Self, ConfigError> {
        if !is_valid_side(cols) {
            return Err(ConfigError::InvalidDimensions {
                sides: InvalidSides::Cols,
            });
        }
        Ok(Self { cols, ..self })
    }

    #[must_use]
    pub const fn fits_horizontally(&self, word_len: usize) -> bool {
        word_len <= self.cols
    }

    #[must_use]
    pub const fn fits_vertically(&self, word_len: usize) -> bool {
        word_len <= self.lines
    }

    /// A word fits when at least one orientation can hold it.
    #[must_use]
    pub const fn fits(&self, word_len: usize) -> bool {
        self.fits_horizontally(word_len) || self.fits_vertically(word_len)
    }
}

/// A `lines × cols` letter grid.
///
/// Cells start empty while words are being placed and are all filled before
/// play begins.
///
/// # Example
///
/// ```
/// use wordsearch_engine::{Cell, Grid, Position};
///
/// let mut grid = Grid::new(5, 6)?;
/// grid.set(Position::new(0, 0), Cell::new('C'));
/// assert_eq!(grid.get(Position::new(0, 0)), Cell::new('C'));
/// assert_eq!(grid.get(Position::new(4, 5)), None);
/// # Ok::<(), wordsearch_engine::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<Option<Cell>>,
}

impl Grid {
    pub fn new(lines: usize, cols: usize) -> Result<Self, ConfigError> {
        Dimensions::new(lines, cols).map(Self::with_dimensions)
    }

    #[must_use]
    pub fn with_dimensions(dims: Dimensions) -> Self {
        Self {
            dims,
            cells: vec![None; dims.lines * dims.cols],
        }
    }

    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dims
    }

    #[must_use]
    pub const fn lines(&self) -> usize {
        self.dims.lines
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.dims.cols
    }

    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.line < self.dims.lines && pos.col < self.dims.cols
    }

    const fn index(&self, pos: Position) -> usize {
        pos.line * self.dims.cols + pos.col
    }

    /// Returns the cell at `pos`, or `None` if it is empty or out of bounds.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if !self.contains(pos) {
            return None;
        }
        self.cells[self.index(pos)]
    }

    /// Overwrites the cell at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, cell: Option<Cell>) {
        assert!(self.contains(pos), "position {pos} is outside the grid");
        let index = self.index(pos);
        self.cells[index] = cell;
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Cell>]> {
        self.cells.chunks(self.dims.cols)
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let Dimensions { lines, cols } = self.dims;
        (0..lines).flat_map(move |line| (0..cols).map(move |col| Position::new(line, col)))
    }

    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns the positions between `a` and `b` inclusive, in increasing order.
    ///
    /// Only straight horizontal or vertical spans are accepted; anything else,
    /// or an endpoint outside the grid, yields `None`.
    #[must_use]
    pub fn span_positions(&self, a: Position, b: Position) -> Option<Vec<Position>> {
        if !self.contains(a) || !self.contains(b) {
            return None;
        }
        if a.line == b.line {
            let (lo, hi) = (a.col.min(b.col), a.col.max(b.col));
            Some((lo..=hi).map(|col| Position::new(a.line, col)).collect())
        } else if a.col == b.col {
            let (lo, hi) = (a.line.min(b.line), a.line.max(b.line));
            Some((lo..=hi).map(|line| Position::new(line, a.col)).collect())
        } else {
            None
        }
    }

    /// Reads the letters of the span between `a` and `b`.
    ///
    /// Returns `None` when the span is not straight or crosses an empty cell.
    #[must_use]
    pub fn span_text(&self, a: Position, b: Position) -> Option<String> {
        self.span_positions(a, b)?
            .into_iter()
            .map(|pos| self.get(pos).map(Cell::letter))
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                match cell {
                    Some(cell) => write!(f, "{cell}")?,
                    None => f.write_str(".")?,
                }
            }
        }
        Ok(())
    }
}
