pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Which grid side(s) failed the range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidSides {
    #[display("`lines`")]
    Lines,
    #[display("`cols`")]
    Cols,
    #[display("`lines` and `cols`")]
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display(
        "the {sides} provided is invalid! it needs to be a number between {} and {}",
        MIN_SIDE_LEN,
        MAX_SIDE_LEN
    )]
    InvalidDimensions { sides: InvalidSides },
    #[display("a game is currently in progress, cannot perform this action")]
    InvalidInGameChange,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenerateError {
    #[display("no word in the list fits the grid")]
    NoUsableWords,
    #[display("no words could be placed in the grid")]
    NoPlaceableWords,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StartError {
    #[display("a game is already in progress")]
    AlreadyInProgress,
    #[display("failed to build the grid: {_0}")]
    Generate(GenerateError),
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlayError {
    #[display("no game is in progress")]
    NotInProgress,
    #[display("position {position} is outside the grid")]
    OutOfBounds { position: Position },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no space to add the word")]
pub struct NoSpaceForWord;
