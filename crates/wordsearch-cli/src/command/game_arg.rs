use std::path::PathBuf;

use anyhow::Context as _;
use wordsearch_engine::{GameConfig, GameSeed, GameSession, ManualWordSource, ReaderWordSource};

use crate::util;

const BUNDLED_WORDS: &str = include_str!("../../assets/words.txt");

/// Options shared by every command that builds a round.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GameArg {
    /// JSON file holding a game configuration; the flags below override it
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of grid lines (5 to 12) [default: 5]
    #[arg(long)]
    lines: Option<usize>,
    /// Number of grid columns (5 to 12) [default: 5]
    #[arg(long)]
    cols: Option<usize>,
    /// Maximum number of words per round, 0 for no limit [default: 4]
    #[arg(long)]
    max_words: Option<usize>,
    /// Shortest word allowed in a round [default: 1]
    #[arg(long)]
    min_word_length: Option<usize>,
    /// Word list file, words separated by whitespace or punctuation
    #[arg(long, value_name = "PATH", conflicts_with = "words")]
    words_file: Option<PathBuf>,
    /// Word to hide in the grid (repeatable)
    #[arg(long = "word", value_name = "WORD")]
    words: Vec<String>,
    /// 32-character hex seed for a reproducible grid
    #[arg(long)]
    seed: Option<GameSeed>,
}

impl GameArg {
    pub(crate) fn game_config(&self) -> anyhow::Result<GameConfig> {
        let base = match &self.config {
            Some(path) => util::read_json_file("game config", path)?,
            None => GameConfig::default(),
        };
        Ok(GameConfig {
            lines: self.lines.unwrap_or(base.lines),
            cols: self.cols.unwrap_or(base.cols),
            max_words: self.max_words.unwrap_or(base.max_words),
            min_word_length: self.min_word_length.unwrap_or(base.min_word_length),
        })
    }

    /// Creates an idle session configured with these options and its word list.
    pub(crate) fn build_session(&self) -> anyhow::Result<GameSession> {
        let config = self.game_config()?;
        let mut session = self
            .seed
            .map_or_else(GameSession::new, GameSession::with_seed);

        if let Some(path) = &self.words_file {
            let mut source = ReaderWordSource::new(util::open_file("word list", path)?);
            session.configure(&config, &mut source)?;
            source
                .finish()
                .with_context(|| format!("Failed to read word list file: {}", path.display()))?;
        } else if self.words.is_empty() {
            session.configure(&config, ManualWordSource::from_lines(BUNDLED_WORDS.lines()))?;
        } else {
            session.configure(&config, ManualWordSource::from_lines(&self.words))?;
        }

        if session.usable_word_count() == 0 {
            log::warn!(
                "no word in the list fits a {}x{} grid",
                config.lines,
                config.cols
            );
        }
        Ok(session)
    }
}
