use std::collections::BTreeSet;

use super::{
    grid::{Cell, Dimensions, is_latin_letter},
    word_source::WordSource,
};

/// Normalized candidate words and the subsets that fit the current grid.
///
/// - `all_words`: every distinct candidate read from the word source
/// - `usable_words`: candidates that fit at least one grid axis
/// - `playable_words`: usable candidates meeting the minimum length
///
/// The derived sets must be recomputed with [`refilter`](Self::refilter)
/// whenever the grid dimensions change.
///
/// # Example
///
/// ```
/// use wordsearch_engine::{Dimensions, ManualWordSource, WordCatalog};
///
/// let dims = Dimensions::new(5, 6)?;
/// let mut catalog = WordCatalog::new();
/// catalog.load(ManualWordSource::from_lines(["cat, dog", "elephant"]), dims);
///
/// assert_eq!(catalog.all_words().len(), 3);
/// assert!(!catalog.usable_words().contains("ELEPHANT"));
/// # Ok::<(), wordsearch_engine::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCatalog {
    all_words: BTreeSet<String>,
    usable_words: BTreeSet<String>,
    playable_words: BTreeSet<String>,
    min_word_length: usize,
}

/// Length of a word in letters (grid cells), not bytes.
#[must_use]
pub fn word_len(word: &str) -> usize {
    word.chars().count()
}

impl WordCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits a raw line into uppercase candidate words.
    ///
    /// Any character that is not a Latin letter separates words. Tokens whose
    /// uppercase form leaves the Latin script are discarded.
    pub fn parse_line(line: &str) -> impl Iterator<Item = String> + '_ {
        line.trim()
            .split(|c: char| !is_latin_letter(c))
            .filter(|token| !token.is_empty())
            .map(str::to_uppercase)
            .filter(|word| word.chars().all(|c| Cell::new(c).is_some()))
    }

    /// Replaces the catalog with the words read from `source`.
    pub fn load<S>(&mut self, mut source: S, dims: Dimensions)
    where
        S: WordSource,
    {
        self.all_words.clear();
        while let Some(line) = source.next_line() {
            self.all_words.extend(Self::parse_line(&line));
        }
        log::debug!("loaded {} distinct words", self.all_words.len());
        self.refilter(dims);
    }

    /// Recomputes the usable and playable subsets for `dims`.
    pub fn refilter(&mut self, dims: Dimensions) {
        self.usable_words = self
            .all_words
            .iter()
            .filter(|word| dims.fits(word_len(word)))
            .cloned()
            .collect();
        self.apply_min_length();
    }

    pub fn set_min_word_length(&mut self, min_word_length: usize) {
        self.min_word_length = min_word_length;
        self.apply_min_length();
    }

    fn apply_min_length(&mut self) {
        let min = self.min_word_length;
        self.playable_words = self
            .usable_words
            .iter()
            .filter(|word| word_len(word) >= min)
            .cloned()
            .collect();
    }

    #[must_use]
    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }

    #[must_use]
    pub fn all_words(&self) -> &BTreeSet<String> {
        &self.all_words
    }

    #[must_use]
    pub fn usable_words(&self) -> &BTreeSet<String> {
        &self.usable_words
    }

    /// Usable words that also meet the minimum length; the pool rounds draw from.
    #[must_use]
    pub fn playable_words(&self) -> &BTreeSet<String> {
        &self.playable_words
    }
}
