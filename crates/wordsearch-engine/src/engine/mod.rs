//! Game logic built on top of the core grid and word list.
//!
//! - [`GameSession`] - Round lifecycle: configuration, generation and word claims
//! - [`GameResults`] - Words in play and words found when a round ends
//! - [`GameSeed`] - Seed for reproducible grids
//! - [`GameView`] / [`ResultsSaver`] - Hooks a front-end plugs into a session
//! - [`placement`] - Writing words into a grid along rows and columns
//! - [`noise`] - Filling the remaining cells with random letters
//!
//! # Round Flow
//!
//! 1. Configure grid size, word limits and the word list while idle
//! 2. [`GameSession::start`] places words and fills the rest with noise
//! 3. The player selects spans (or types guesses) until every word is found,
//!    or ends the round early
//! 4. The results go to the view and the optional saver, and the session is
//!    idle again, ready for another round
//!
//! # Example
//!
//! ```
//! use wordsearch_engine::{GameConfig, GameSeed, GameSession, ManualWordSource};
//!
//! let mut session = GameSession::with_seed(GameSeed::from_bytes([7; 16]));
//! session.configure(
//!     &GameConfig::default(),
//!     ManualWordSource::from_lines(["rust crab", "ferris"]),
//! )?;
//! session.start(())?;
//! println!("{}", session.grid().unwrap());
//!
//! session.match_word("crab", ())?;
//! let results = session.end(())?;
//! assert_eq!(results.words_found().len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    game_results::*,
    game_session::*,
    placement::{Direction, Orientation, PlacedWord, Population},
    seed::*,
    view::*,
};

mod game_results;
mod game_session;
pub mod noise;
pub mod placement;
mod seed;
mod view;
