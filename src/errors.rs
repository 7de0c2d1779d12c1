use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::Orientation;

/// Top-level error type for the engine
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoridorError {
    #[error("move rejected: {0}")]
    Move(#[from] MoveError),

    #[error("wall rejected: {0}")]
    Wall(#[from] WallError),

    #[error("malformed state: {0}")]
    MalformedState(#[from] StateError),

    #[error("the match is already finished")]
    GameFinished,

    #[error("internal error: {0}")]
    Internal(String),
}

/// Token-move validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveError {
    #[error("player {0} is not a valid player id")]
    InvalidPlayer(u8),

    #[error("position ({0}, {1}) is outside the board")]
    InvalidPosition(u8, u8),

    #[error("({0}, {1}) is not reachable in one hop from the current position")]
    IllegalMove(u8, u8),
}

/// Wall-placement validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallError {
    #[error("player {0} is not a valid player id")]
    InvalidPlayer(u8),

    #[error("player {0} has no walls left")]
    NoWallsLeft(u8),

    #[error("{orientation} wall at ({x}, {y}) is out of bounds")]
    OutOfBounds { x: u8, y: u8, orientation: Orientation },

    #[error("{orientation} wall at ({x}, {y}) overlaps an existing wall")]
    Overlap { x: u8, y: u8, orientation: Orientation },

    #[error("wall at ({x}, {y}) would imprison {player}")]
    WouldImprison { x: u8, y: u8, player: String },
}

/// Rejections raised while validating a supplied snapshot at construction
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateError {
    #[error("expected 20 walls in play, found {0}")]
    WallCount(usize),

    #[error("player {name} starts with {walls} walls, allowed range is 0..=10")]
    PlayerWalls { name: String, walls: u8 },

    #[error("player {name} starts outside the board at ({x}, {y})")]
    PlayerPosition { name: String, x: u8, y: u8 },

    #[error("wall layout contains an invalid {orientation} wall at ({x}, {y})")]
    WallPosition { x: u8, y: u8, orientation: Orientation },

    #[error("wall layout contains overlapping walls at ({x}, {y})")]
    WallOverlap { x: u8, y: u8 },

    #[error("player {name} has no remaining path to the goal")]
    PlayerImprisoned { name: String },
}

/// Text that does not spell a `(D|MH|MV) x y` move
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse '{0}' as a move, expected '(D|MH|MV) x y'")]
pub struct MoveParseError(pub String);

/// Result type alias for engine operations
pub type QuoridorResult<T> = Result<T, QuoridorError>;
