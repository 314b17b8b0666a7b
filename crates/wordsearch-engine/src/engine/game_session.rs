use std::collections::BTreeSet;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, PlayError, StartError,
    core::{
        grid::{Cell, Dimensions, Grid, MIN_SIDE_LEN, Position},
        word_catalog::WordCatalog,
        word_source::WordSource,
    },
};

use super::{
    GameResults, GameSeed, GameView, ResultsSaver, ViewMessage, noise,
    placement::{self, PlacedWord},
};

/// Round settings chosen before a game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub lines: usize,
    pub cols: usize,
    /// Upper bound on words per round; 0 means no limit.
    pub max_words: usize,
    /// Shortest word allowed in a round; 0 and 1 disable the filter.
    pub min_word_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lines: MIN_SIDE_LEN,
            cols: MIN_SIDE_LEN,
            max_words: 4,
            min_word_length: 1,
        }
    }
}

impl GameConfig {
    pub fn dimensions(&self) -> Result<Dimensions, ConfigError> {
        Dimensions::new(self.lines, self.cols)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum SessionState {
    #[default]
    Idle,
    InProgress,
}

/// A word claimed by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundWord {
    pub word: String,
    /// Set when this word was the last one and the round ended.
    pub results: Option<GameResults>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SelectOutcome {
    /// First cell of a selection; waiting for the second.
    Anchored(Position),
    Found(FoundWord),
    /// The span did not spell a remaining word. `candidate` is empty when the
    /// two cells were not on a common line.
    Missed { candidate: String },
}

/// A word-search game: configuration, grid generation and player progress.
///
/// The session is `Idle` until [`start`](Self::start) builds a grid, then
/// `InProgress` until every word is found or [`end`](Self::end) is called.
/// Configuration can only change while `Idle`.
///
/// # Example
///
/// ```
/// use wordsearch_engine::{GameConfig, GameSession, ManualWordSource, SelectOutcome};
///
/// let mut session = GameSession::new();
/// let config = GameConfig { lines: 5, cols: 5, max_words: 2, min_word_length: 1 };
/// session.configure(&config, ManualWordSource::from_lines(["cat", "dog"]))?;
/// session.start(())?;
///
/// let placed = session.placed_words()[0].clone();
/// session.select(placed.start, ())?;
/// let outcome = session.select(placed.end, ())?;
/// assert!(outcome.is_found());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct GameSession {
    seed: GameSeed,
    rng: Pcg32,
    dims: Dimensions,
    max_words: usize,
    catalog: WordCatalog,
    saver: Option<Box<dyn ResultsSaver>>,
    state: SessionState,
    grid: Option<Grid>,
    placed: Vec<PlacedWord>,
    words_in_play: BTreeSet<String>,
    words_remaining: BTreeSet<String>,
    words_found: BTreeSet<String>,
    selection_anchor: Option<Position>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates an idle session with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(GameSeed::random())
    }

    /// Like [`Self::new`], but every round is reproducible from `seed`.
    #[must_use]
    pub fn with_seed(seed: GameSeed) -> Self {
        let config = GameConfig::default();
        let mut catalog = WordCatalog::new();
        catalog.set_min_word_length(config.min_word_length);
        Self {
            seed,
            rng: seed.rng(),
            dims: Dimensions::default(),
            max_words: config.max_words,
            catalog,
            saver: None,
            state: SessionState::Idle,
            grid: None,
            placed: Vec::new(),
            words_in_play: BTreeSet::new(),
            words_remaining: BTreeSet::new(),
            words_found: BTreeSet::new(),
            selection_anchor: None,
        }
    }

    fn ensure_idle(&self) -> Result<(), ConfigError> {
        if self.state.is_in_progress() {
            return Err(ConfigError::InvalidInGameChange);
        }
        Ok(())
    }

    fn ensure_in_progress(&self) -> Result<&Grid, PlayError> {
        match (&self.state, &self.grid) {
            (SessionState::InProgress, Some(grid)) => Ok(grid),
            _ => Err(PlayError::NotInProgress),
        }
    }

    /// Applies a full configuration and loads a new word list.
    ///
    /// Everything is validated before anything changes.
    pub fn configure<S>(&mut self, config: &GameConfig, source: S) -> Result<(), ConfigError>
    where
        S: WordSource,
    {
        self.ensure_idle()?;
        let dims = config.dimensions()?;
        self.dims = dims;
        self.max_words = config.max_words;
        self.catalog.set_min_word_length(config.min_word_length);
        self.catalog.load(source, dims);
        log::debug!(
            "configured {}x{} grid, {} usable words",
            dims.lines(),
            dims.cols(),
            self.catalog.usable_words().len()
        );
        Ok(())
    }

    fn apply_dimensions(&mut self, dims: Dimensions) {
        self.dims = dims;
        if !self.catalog.is_empty() {
            self.catalog.refilter(dims);
        }
    }

    pub fn set_dimensions(&mut self, lines: usize, cols: usize) -> Result<(), ConfigError> {
        self.ensure_idle()?;
        let dims = Dimensions::new(lines, cols)?;
        self.apply_dimensions(dims);
        Ok(())
    }

    pub fn set_lines(&mut self, lines: usize) -> Result<(), ConfigError> {
        self.ensure_idle()?;
        let dims = self.dims.with_lines(lines)?;
        self.apply_dimensions(dims);
        Ok(())
    }

    pub fn set_cols(&mut self, cols: usize) -> Result<(), ConfigError> {
        self.ensure_idle()?;
        let dims = self.dims.with_cols(cols)?;
        self.apply_dimensions(dims);
        Ok(())
    }

    pub fn set_max_words(&mut self, max_words: usize) -> Result<(), ConfigError> {
        self.ensure_idle()?;
        self.max_words = max_words;
        Ok(())
    }

    pub fn set_min_word_length(&mut self, min_word_length: usize) -> Result<(), ConfigError> {
        self.ensure_idle()?;
        self.catalog.set_min_word_length(min_word_length);
        Ok(())
    }

    /// Replaces the word list.
    pub fn load_words<S>(&mut self, source: S) -> Result<(), ConfigError>
    where
        S: WordSource,
    {
        self.ensure_idle()?;
        self.catalog.load(source, self.dims);
        Ok(())
    }

    /// Installs or removes the sink that receives each round's results.
    pub fn set_results_saver(
        &mut self,
        saver: Option<Box<dyn ResultsSaver>>,
    ) -> Result<(), ConfigError> {
        self.ensure_idle()?;
        self.saver = saver;
        Ok(())
    }

    #[must_use]
    pub fn seed(&self) -> GameSeed {
        self.seed
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        GameConfig {
            lines: self.dims.lines(),
            cols: self.dims.cols(),
            max_words: self.max_words,
            min_word_length: self.catalog.min_word_length(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    /// Number of words that fit the current grid.
    #[must_use]
    pub fn usable_word_count(&self) -> usize {
        self.catalog.usable_words().len()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.state.is_in_progress()
    }

    /// The grid of the current round, or of the last one once it has ended.
    #[must_use]
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    #[must_use]
    pub fn cell_at(&self, pos: Position) -> Option<Cell> {
        self.grid.as_ref()?.get(pos)
    }

    #[must_use]
    pub fn placed_words(&self) -> &[PlacedWord] {
        &self.placed
    }

    #[must_use]
    pub fn words_in_play(&self) -> &BTreeSet<String> {
        &self.words_in_play
    }

    #[must_use]
    pub fn words_remaining(&self) -> &BTreeSet<String> {
        &self.words_remaining
    }

    #[must_use]
    pub fn words_found(&self) -> &BTreeSet<String> {
        &self.words_found
    }

    #[must_use]
    pub fn selection_anchor(&self) -> Option<Position> {
        self.selection_anchor
    }

    #[must_use]
    pub fn all_words_found(&self) -> bool {
        self.words_remaining.is_empty()
    }

    /// Snapshot of the current (or last) round without ending it.
    #[must_use]
    pub fn current_results(&self) -> GameResults {
        GameResults::new(self.words_in_play.clone(), self.words_found.clone())
    }

    /// Builds a new grid and starts a round.
    ///
    /// On failure the session stays `Idle` and the previous grid is kept.
    pub fn start<V>(&mut self, mut view: V) -> Result<(), StartError>
    where
        V: GameView,
    {
        if self.state.is_in_progress() {
            return Err(StartError::AlreadyInProgress);
        }

        let mut grid = Grid::with_dimensions(self.dims);
        let population = placement::populate(
            &mut grid,
            self.catalog.playable_words(),
            self.max_words,
            &mut self.rng,
        )
        .map_err(StartError::Generate)?;
        let noise = noise::fill(&mut grid, &mut self.rng);

        log::info!(
            "round started: {} words placed, {} dropped, {noise} noise cells",
            population.placed.len(),
            population.skipped.len()
        );
        log::debug!("grid:\n{grid}");

        self.words_in_play = population.words();
        self.words_remaining = self.words_in_play.clone();
        self.words_found.clear();
        self.placed = population.placed;
        self.selection_anchor = None;
        self.state = SessionState::InProgress;
        view.game_started(&grid);
        self.grid = Some(grid);
        Ok(())
    }

    /// Handles a click on `pos`.
    ///
    /// The first click anchors a selection. The second reads the straight span
    /// between the two cells and claims it if it, or its reverse, is a
    /// remaining word. Finding the last word ends the round.
    pub fn select<V>(&mut self, pos: Position, mut view: V) -> Result<SelectOutcome, PlayError>
    where
        V: GameView,
    {
        if !self.ensure_in_progress()?.contains(pos) {
            return Err(PlayError::OutOfBounds { position: pos });
        }

        let Some(anchor) = self.selection_anchor.take() else {
            self.selection_anchor = Some(pos);
            return Ok(SelectOutcome::Anchored(pos));
        };

        let grid = self.ensure_in_progress()?;
        let candidate = grid.span_text(anchor, pos).unwrap_or_default();
        let positions = grid.span_positions(anchor, pos).unwrap_or_default();
        let Some(word) = self.claim(&candidate, true) else {
            log::debug!("selection {anchor}..{pos} read {candidate:?}, no match");
            return Ok(SelectOutcome::Missed { candidate });
        };

        view.word_found(anchor, pos);
        Ok(SelectOutcome::Found(self.after_claim(word, positions, &mut view)))
    }

    /// Checks a typed guess against the remaining words.
    ///
    /// Unlike [`select`](Self::select), the reversed guess is not tried.
    pub fn match_word<V>(&mut self, guess: &str, mut view: V) -> Result<Option<FoundWord>, PlayError>
    where
        V: GameView,
    {
        self.ensure_in_progress()?;
        let guess = guess.trim().to_uppercase();
        let Some(word) = self.claim(&guess, false) else {
            return Ok(None);
        };

        let positions = self
            .placed
            .iter()
            .find(|placed| placed.word == word)
            .map(|placed| {
                view.word_found(placed.start, placed.end);
                placed.positions()
            })
            .unwrap_or_default();
        Ok(Some(self.after_claim(word, positions, &mut view)))
    }

    /// Drops a pending anchor, returning it.
    pub fn cancel_selection(&mut self) -> Result<Option<Position>, PlayError> {
        self.ensure_in_progress()?;
        Ok(self.selection_anchor.take())
    }

    /// Ends the round and returns its results.
    pub fn end<V>(&mut self, mut view: V) -> Result<GameResults, PlayError>
    where
        V: GameView,
    {
        self.ensure_in_progress()?;
        Ok(self.finish(&mut view))
    }

    fn claim(&mut self, word: &str, allow_reversed: bool) -> Option<String> {
        if word.is_empty() {
            return None;
        }
        if self.words_remaining.remove(word) {
            self.words_found.insert(word.to_owned());
            return Some(word.to_owned());
        }
        if allow_reversed {
            let reversed: String = word.chars().rev().collect();
            if self.words_remaining.remove(&reversed) {
                self.words_found.insert(reversed.clone());
                return Some(reversed);
            }
        }
        None
    }

    fn after_claim<V>(&mut self, word: String, positions: Vec<Position>, view: &mut V) -> FoundWord
    where
        V: GameView,
    {
        log::debug!("found {word}, {} remaining", self.words_remaining.len());
        view.update(&ViewMessage {
            positions,
            message: word.clone(),
        });
        let results = self.all_words_found().then(|| self.finish(view));
        FoundWord { word, results }
    }

    fn finish<V>(&mut self, view: &mut V) -> GameResults
    where
        V: GameView,
    {
        self.state = SessionState::Idle;
        self.selection_anchor = None;
        let results = self.current_results();
        log::info!(
            "round ended: {} of {} words found",
            results.words_found().len(),
            results.words().len()
        );
        view.game_ended(&results);
        if let Some(saver) = &mut self.saver
            && let Err(e) = saver.save(&results)
        {
            log::warn!("failed to save game results: {e}");
        }
        results
    }
}
