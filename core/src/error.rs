use thiserror::Error;

use crate::Coord;

/// Failure to set up a game, fatal to the session.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid grid size or number of mines: size {size}, mines {mines}")]
    InvalidConfiguration { size: i64, mines: i64 },
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// A rejected move. The game state is left untouched and the session goes on;
/// the `Display` text is what the player gets to read.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Invalid input format. Use row,col (e.g., 0,1)")]
    InvalidFormat,
    #[error("Invalid row or column value. Must be numbers.")]
    InvalidNumber,
    #[error("Coordinates out of bounds (0-{max}).")]
    OutOfBounds { max: Coord },
    #[error("Cell already revealed. Choose another.")]
    AlreadyRevealed,
    #[error("Cannot reveal flagged cell. Unflag it first.")]
    FlaggedCell,
    #[error("Cannot flag revealed cell.")]
    RevealedCell,
    #[error("Game is over, no new moves are accepted")]
    GameOver,
}

pub type MoveResult<T> = core::result::Result<T, MoveError>;

impl GameError {
    pub(crate) fn invalid_config(size: impl Into<i64>, mines: impl Into<i64>) -> Self {
        Self::InvalidConfiguration {
            size: size.into(),
            mines: mines.into(),
        }
    }
}

