use std::{
    collections::{BTreeSet, HashSet},
    iter,
};

use rand::{Rng, seq::SliceRandom as _};
use serde::{Deserialize, Serialize};

use crate::{
    GenerateError, NoSpaceForWord,
    core::{
        grid::{Cell, Dimensions, Grid, Position},
        word_catalog::word_len,
    },
};

/// Axis a word is written along. Diagonals are not supported.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[display("horizontal")]
    Horizontal,
    #[display("vertical")]
    Vertical,
}

impl Orientation {
    fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        if rng.random_bool(0.5) {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    #[must_use]
    pub const fn fits(self, dims: Dimensions, word_len: usize) -> bool {
        match self {
            Self::Horizontal => dims.fits_horizontally(word_len),
            Self::Vertical => dims.fits_vertically(word_len),
        }
    }

    /// Length of the lines words are written on.
    const fn axis_len(self, dims: Dimensions) -> usize {
        match self {
            Self::Horizontal => dims.cols(),
            Self::Vertical => dims.lines(),
        }
    }

    /// Number of parallel lines available.
    const fn lane_count(self, dims: Dimensions) -> usize {
        match self {
            Self::Horizontal => dims.lines(),
            Self::Vertical => dims.cols(),
        }
    }

    const fn position(self, lane: usize, offset: usize) -> Position {
        match self {
            Self::Horizontal => Position::new(lane, offset),
            Self::Vertical => Position::new(offset, lane),
        }
    }
}

/// Reading direction along the orientation axis.
///
/// `Forward` reads left-to-right or top-to-bottom.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[display("forward")]
    Forward,
    #[display("backward")]
    Backward,
}

impl Direction {
    fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        if rng.random_bool(0.5) {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}

/// A word written into the grid.
///
/// `start` holds the word's first letter and `end` its last, so reading from
/// `start` to `end` spells the word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub word: String,
    pub start: Position,
    pub end: Position,
    pub orientation: Orientation,
    pub direction: Direction,
}

impl PlacedWord {
    /// Cell positions in reading order, from `start` to `end`.
    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        let span = LineSpan::from_placed(self);
        span.positions().collect()
    }
}

/// Outcome of [`populate`]: the words that made it into the grid and the ones
/// that were selected but dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Population {
    pub placed: Vec<PlacedWord>,
    pub skipped: BTreeSet<String>,
}

impl Population {
    /// The placed words as a set.
    #[must_use]
    pub fn words(&self) -> BTreeSet<String> {
        self.placed.iter().map(|p| p.word.clone()).collect()
    }
}

/// A straight run of cells along one lane.
#[derive(Debug, Clone, Copy)]
struct LineSpan {
    orientation: Orientation,
    direction: Direction,
    lane: usize,
    offset: usize,
    len: usize,
}

impl LineSpan {
    fn from_placed(placed: &PlacedWord) -> Self {
        let (lane, a, b) = match placed.orientation {
            Orientation::Horizontal => (placed.start.line, placed.start.col, placed.end.col),
            Orientation::Vertical => (placed.start.col, placed.start.line, placed.end.line),
        };
        Self {
            orientation: placed.orientation,
            direction: placed.direction,
            lane,
            offset: a.min(b),
            len: a.abs_diff(b) + 1,
        }
    }

    /// Positions in the order the word's letters are written.
    fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.len).map(move |i| {
            let along = match self.direction {
                Direction::Forward => self.offset + i,
                Direction::Backward => self.offset + self.len - 1 - i,
            };
            self.orientation.position(self.lane, along)
        })
    }

    fn into_placed(self, word: &str) -> PlacedWord {
        let first = self.offset;
        let last = self.offset + self.len - 1;
        let (start, end) = match self.direction {
            Direction::Forward => (first, last),
            Direction::Backward => (last, first),
        };
        PlacedWord {
            word: word.to_owned(),
            start: self.orientation.position(self.lane, start),
            end: self.orientation.position(self.lane, end),
            orientation: self.orientation,
            direction: self.direction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
enum Attempt {
    Placed,
    Conflict,
}

/// Writes `letters` at `positions`, undoing every write on a letter conflict.
///
/// Cells that already hold the same letter are shared with another word and
/// are never cleared on rollback.
fn write_letters<I>(grid: &mut Grid, letters: &[Cell], positions: I) -> Attempt
where
    I: IntoIterator<Item = Position>,
{
    let mut undo: Vec<(Position, Option<Cell>)> = Vec::with_capacity(letters.len());
    for (&letter, pos) in iter::zip(letters, positions) {
        match grid.get(pos) {
            None => {
                undo.push((pos, None));
                grid.set(pos, Some(letter));
            }
            Some(existing) if existing == letter => {}
            Some(_) => {
                for (pos, previous) in undo.into_iter().rev() {
                    grid.set(pos, previous);
                }
                return Attempt::Conflict;
            }
        }
    }
    Attempt::Placed
}

/// Places a single word along `orientation`, retrying random lines until one
/// accepts it.
///
/// Each `(offset, lane)` combination that conflicts is remembered. Once every
/// combination has been tried the word is rejected with [`NoSpaceForWord`] and
/// the grid is left untouched.
pub fn place_word<R>(
    grid: &mut Grid,
    word: &str,
    orientation: Orientation,
    rng: &mut R,
) -> Result<PlacedWord, NoSpaceForWord>
where
    R: Rng + ?Sized,
{
    let letters = word
        .chars()
        .map(Cell::new)
        .collect::<Option<Vec<_>>>()
        .ok_or(NoSpaceForWord)?;
    let len = letters.len();
    let dims = grid.dimensions();
    let axis_len = orientation.axis_len(dims);
    if len == 0 || len > axis_len {
        return Err(NoSpaceForWord);
    }

    let lanes = orientation.lane_count(dims);
    let offsets = axis_len - len + 1;
    let capacity = lanes * offsets;
    let direction = Direction::random(rng);

    let mut invalid = HashSet::with_capacity(capacity);
    while invalid.len() < capacity {
        let offset = rng.random_range(0..offsets);
        let lane = rng.random_range(0..lanes);
        if invalid.contains(&(offset, lane)) {
            continue;
        }
        let span = LineSpan {
            orientation,
            direction,
            lane,
            offset,
            len,
        };
        match write_letters(grid, &letters, span.positions()) {
            Attempt::Placed => return Ok(span.into_placed(word)),
            Attempt::Conflict => _ = invalid.insert((offset, lane)),
        }
    }

    log::debug!("{word}: all {capacity} {orientation} lines conflict");
    Err(NoSpaceForWord)
}

/// Chooses the round's words and writes them into `grid`.
///
/// Up to `max_words` words (all of them when `max_words` is 0) are drawn at
/// random from `usable`. Each gets a random orientation, flipped when the word
/// does not fit that axis, and falls back to the other orientation once if
/// there is no room. Words that cannot be placed either way are skipped.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
///
/// use wordsearch_engine::{Grid, placement};
///
/// let mut grid = Grid::new(5, 5)?;
/// let words = BTreeSet::from(["CAT".to_owned(), "DOG".to_owned()]);
/// let population = placement::populate(&mut grid, &words, 2, &mut rand::rng())?;
///
/// for placed in &population.placed {
///     assert_eq!(grid.span_text(placed.start, placed.end).map(|s| s.len()), Some(3));
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn populate<R>(
    grid: &mut Grid,
    usable: &BTreeSet<String>,
    max_words: usize,
    rng: &mut R,
) -> Result<Population, GenerateError>
where
    R: Rng + ?Sized,
{
    if usable.is_empty() {
        return Err(GenerateError::NoUsableWords);
    }

    let mut selected: Vec<&String> = usable.iter().collect();
    selected.shuffle(rng);
    if max_words != 0 {
        selected.truncate(max_words);
    }

    let dims = grid.dimensions();
    let mut population = Population::default();
    for word in selected {
        let len = word_len(word);
        let mut orientation = Orientation::random(rng);
        if !orientation.fits(dims, len) {
            orientation = orientation.flipped();
        }
        if !orientation.fits(dims, len) {
            log::debug!("{word}: does not fit the grid, dropped");
            population.skipped.insert(word.clone());
            continue;
        }

        let result = place_word(grid, word, orientation, rng).or_else(|NoSpaceForWord| {
            let other = orientation.flipped();
            if !other.fits(dims, len) {
                return Err(NoSpaceForWord);
            }
            log::debug!("{word}: no room {orientation}, trying {other}");
            place_word(grid, word, other, rng)
        });

        match result {
            Ok(placed) => {
                log::debug!(
                    "{word}: placed {} {} from {} to {}",
                    placed.orientation,
                    placed.direction,
                    placed.start,
                    placed.end
                );
                population.placed.push(placed);
            }
            Err(NoSpaceForWord) => {
                log::debug!("{word}: no space left, dropped");
                population.skipped.insert(word.clone());
            }
        }
    }

    if population.placed.is_empty() {
        return Err(GenerateError::NoPlaceableWords);
    }
    Ok(population)
}

#[cfg(test)]
mod tests {
    use rand_pcg::Pcg32;

    use crate::GameSeed;

    use super::*;

    fn rng(n: u8) -> Pcg32 {
        GameSeed::from_bytes([n; 16]).rng()
    }

    fn words(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|w| (*w).to_owned()).collect()
    }

    fn filled(lines: usize, cols: usize, letter: char) -> Grid {
        let mut grid = Grid::new(lines, cols).unwrap();
        for pos in grid.positions() {
            grid.set(pos, Cell::new(letter));
        }
        grid
    }

    fn read(grid: &Grid, placed: &PlacedWord) -> String {
        placed
            .positions()
            .into_iter()
            .map(|pos| grid.get(pos).unwrap().letter())
            .collect()
    }

    mod single_word {
        use super::*;

        #[test]
        fn test_placed_word_reads_back() {
            for seed in 0..32 {
                for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                    let mut grid = Grid::new(6, 9).unwrap();
                    let placed = place_word(&mut grid, "WORDS", orientation, &mut rng(seed)).unwrap();
                    assert_eq!(placed.orientation, orientation);
                    assert_eq!(read(&grid, &placed), "WORDS");
                    assert_eq!(grid.positions().filter(|p| grid.get(*p).is_some()).count(), 5);
                }
            }
        }

        #[test]
        fn test_start_and_end_follow_direction() {
            for seed in 0..32 {
                let mut grid = Grid::new(5, 5).unwrap();
                let placed =
                    place_word(&mut grid, "ABC", Orientation::Horizontal, &mut rng(seed)).unwrap();
                assert_eq!(placed.start.line, placed.end.line);
                match placed.direction {
                    Direction::Forward => assert_eq!(placed.end.col, placed.start.col + 2),
                    Direction::Backward => assert_eq!(placed.start.col, placed.end.col + 2),
                }
            }
        }

        #[test]
        fn test_word_as_long_as_cols_fits_horizontally() {
            for seed in 0..16 {
                let mut grid = Grid::new(5, 7).unwrap();
                let placed =
                    place_word(&mut grid, "ABCDEFG", Orientation::Horizontal, &mut rng(seed))
                        .unwrap();
                assert_eq!(read(&grid, &placed), "ABCDEFG");
            }
        }

        #[test]
        fn test_too_long_for_axis() {
            let mut grid = Grid::new(5, 7).unwrap();
            assert_eq!(
                place_word(&mut grid, "ABCDEF", Orientation::Vertical, &mut rng(0)),
                Err(NoSpaceForWord)
            );
        }

        #[test]
        fn test_full_conflicting_grid_has_no_space() {
            let mut grid = filled(5, 5, 'X');
            let before = grid.clone();
            assert_eq!(
                place_word(&mut grid, "CAT", Orientation::Horizontal, &mut rng(3)),
                Err(NoSpaceForWord)
            );
            assert_eq!(grid, before);
        }

        #[test]
        fn test_only_free_line_is_found() {
            for seed in 0..16 {
                let mut grid = filled(5, 5, 'X');
                for col in 0..5 {
                    grid.set(Position::new(2, col), None);
                }
                let placed =
                    place_word(&mut grid, "CAT", Orientation::Horizontal, &mut rng(seed)).unwrap();
                assert_eq!(placed.start.line, 2);
                assert_eq!(read(&grid, &placed), "CAT");
                assert_eq!(grid.positions().filter(|p| grid.get(*p).is_none()).count(), 2);
            }
        }

        #[test]
        fn test_shares_matching_letters() {
            let mut grid = filled(5, 5, 'A');
            let before = grid.clone();
            let placed = place_word(&mut grid, "AAA", Orientation::Vertical, &mut rng(1)).unwrap();
            assert_eq!(read(&grid, &placed), "AAA");
            assert_eq!(grid, before);
        }

        #[test]
        fn test_non_letter_word_is_rejected() {
            let mut grid = Grid::new(5, 5).unwrap();
            assert_eq!(
                place_word(&mut grid, "A1", Orientation::Horizontal, &mut rng(0)),
                Err(NoSpaceForWord)
            );
        }
    }

    mod rollback {
        use super::*;

        fn letters(word: &str) -> Vec<Cell> {
            word.chars().map(|c| Cell::new(c).unwrap()).collect()
        }

        #[test]
        fn test_conflict_restores_written_cells_only() {
            let mut grid = Grid::new(5, 5).unwrap();
            grid.set(Position::new(0, 1), Cell::new('A'));
            grid.set(Position::new(0, 3), Cell::new('Q'));
            let before = grid.clone();

            let positions = (0..4).map(|col| Position::new(0, col));
            let attempt = write_letters(&mut grid, &letters("CATS"), positions);

            assert!(attempt.is_conflict());
            assert_eq!(grid, before);
            assert_eq!(grid.get(Position::new(0, 1)), Cell::new('A'));
        }

        #[test]
        fn test_success_keeps_shared_and_new_cells() {
            let mut grid = Grid::new(5, 5).unwrap();
            grid.set(Position::new(1, 0), Cell::new('A'));

            let positions = (0..3).map(|line| Position::new(line, 0));
            let attempt = write_letters(&mut grid, &letters("BAT"), positions);

            assert!(attempt.is_placed());
            assert_eq!(
                grid.span_text(Position::new(0, 0), Position::new(2, 0)).as_deref(),
                Some("BAT")
            );
        }
    }

    mod populate {
        use super::*;

        #[test]
        fn test_empty_word_set_is_rejected() {
            let mut grid = Grid::new(5, 5).unwrap();
            assert_eq!(
                populate(&mut grid, &BTreeSet::new(), 3, &mut rng(0)),
                Err(GenerateError::NoUsableWords)
            );
        }

        #[test]
        fn test_nothing_placeable() {
            let mut grid = filled(5, 5, 'X');
            assert_eq!(
                populate(&mut grid, &words(&["CAT", "DOG"]), 0, &mut rng(0)),
                Err(GenerateError::NoPlaceableWords)
            );
        }

        #[test]
        fn test_two_short_words_on_small_grid() {
            for seed in 0..32 {
                let mut grid = Grid::new(5, 5).unwrap();
                let population =
                    populate(&mut grid, &words(&["CAT", "DOG"]), 2, &mut rng(seed)).unwrap();
                assert_eq!(population.words(), words(&["CAT", "DOG"]));
                assert!(population.skipped.is_empty());
                for placed in &population.placed {
                    assert_eq!(read(&grid, placed), placed.word);
                }
            }
        }

        #[test]
        fn test_max_words_caps_selection() {
            let pool = words(&["ONE", "TWO", "SIX", "TEN", "RED", "BLUE"]);
            let mut grid = Grid::new(12, 12).unwrap();
            let population = populate(&mut grid, &pool, 3, &mut rng(5)).unwrap();
            assert_eq!(population.placed.len() + population.skipped.len(), 3);
            assert!(population.words().is_subset(&pool));
        }

        #[test]
        fn test_zero_max_words_takes_all() {
            let pool = words(&["ONE", "TWO", "SIX", "TEN"]);
            let mut grid = Grid::new(12, 12).unwrap();
            let population = populate(&mut grid, &pool, 0, &mut rng(9)).unwrap();
            assert_eq!(population.placed.len() + population.skipped.len(), 4);
        }

        #[test]
        fn test_unfit_orientation_is_flipped() {
            for seed in 0..32 {
                let mut grid = Grid::new(5, 10).unwrap();
                let population =
                    populate(&mut grid, &words(&["LONGERWORD"]), 1, &mut rng(seed)).unwrap();
                assert_eq!(population.placed[0].orientation, Orientation::Horizontal);
            }
        }

        #[test]
        fn test_word_fitting_no_axis_is_skipped() {
            let mut grid = Grid::new(5, 5).unwrap();
            let population =
                populate(&mut grid, &words(&["CAT", "ELEPHANT"]), 0, &mut rng(2)).unwrap();
            assert_eq!(population.words(), words(&["CAT"]));
            assert_eq!(population.skipped, words(&["ELEPHANT"]));
        }

        #[test]
        fn test_blocked_orientation_falls_back() {
            for seed in 0..64 {
                let mut grid = filled(5, 5, 'X');
                for line in 0..5 {
                    grid.set(Position::new(line, 2), None);
                }
                let population =
                    populate(&mut grid, &words(&["CAT"]), 1, &mut rng(seed)).unwrap();
                let placed = &population.placed[0];
                assert_eq!(placed.orientation, Orientation::Vertical);
                assert_eq!((placed.start.col, placed.end.col), (2, 2));
                assert_eq!(read(&grid, placed), "CAT");
            }
        }

        #[test]
        fn test_word_without_room_is_skipped() {
            for seed in 0..32 {
                let mut grid = filled(5, 5, 'X');
                for line in 0..5 {
                    grid.set(Position::new(line, 2), None);
                }
                let population =
                    populate(&mut grid, &words(&["CAT", "DOG"]), 0, &mut rng(seed)).unwrap();
                assert_eq!(population.placed.len(), 1);
                assert_eq!(population.skipped.len(), 1);
                assert_eq!(population.words().union(&population.skipped).count(), 2);

                let placed = &population.placed[0];
                assert_eq!(placed.orientation, Orientation::Vertical);
                assert_eq!(read(&grid, placed), placed.word);
            }
        }

        #[test]
        fn test_same_seed_same_grid() {
            let pool = words(&["APPLE", "PEAR", "PLUM", "FIG", "KIWI"]);
            let mut a = Grid::new(7, 7).unwrap();
            let mut b = Grid::new(7, 7).unwrap();
            let pa = populate(&mut a, &pool, 4, &mut rng(11)).unwrap();
            let pb = populate(&mut b, &pool, 4, &mut rng(11)).unwrap();
            assert_eq!(pa, pb);
            assert_eq!(a, b);
        }
    }
}
