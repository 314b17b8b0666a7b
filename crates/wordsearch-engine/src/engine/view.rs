use std::{error::Error, fmt};

use crate::{
    GameResults,
    core::grid::{Grid, Position},
};

/// A message for the view: the cells it concerns and a line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewMessage {
    pub positions: Vec<Position>,
    pub message: String,
}

/// Callbacks a front-end implements to follow a [`GameSession`](crate::GameSession).
///
/// The session calls these synchronously and never owns the view; it is
/// passed to each operation that may notify it. Every method defaults to a
/// no-op, and `()` is a view that ignores everything.
pub trait GameView {
    fn update(&mut self, _message: &ViewMessage) {}

    fn game_started(&mut self, _grid: &Grid) {}

    /// A word was found on the straight span between `start` and `end`.
    fn word_found(&mut self, _start: Position, _end: Position) {}

    fn game_ended(&mut self, _results: &GameResults) {}
}

impl GameView for () {}

impl<V> GameView for &mut V
where
    V: GameView + ?Sized,
{
    fn update(&mut self, message: &ViewMessage) {
        (**self).update(message);
    }

    fn game_started(&mut self, grid: &Grid) {
        (**self).game_started(grid);
    }

    fn word_found(&mut self, start: Position, end: Position) {
        (**self).word_found(start, end);
    }

    fn game_ended(&mut self, results: &GameResults) {
        (**self).game_ended(results);
    }
}

pub type SaveError = Box<dyn Error + Send + Sync>;

/// Sink that records the results of every finished round.
///
/// Failures are logged by the session and never interrupt the game.
pub trait ResultsSaver: fmt::Debug {
    fn save(&mut self, results: &GameResults) -> Result<(), SaveError>;
}
