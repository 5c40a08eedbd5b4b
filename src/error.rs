//! Errors for board construction, moves and text parsing

use crate::board::{Color, Loc};

/// Errors from board construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board size {width}x{height}")]
    InvalidSize { width: usize, height: usize },
}

/// A mutation that was refused. The board is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("location {0:?} is not on the board")]
    OutOfBounds(Loc),

    #[error("location {0:?} is already occupied")]
    Occupied(Loc),

    #[error("cannot place a stone of color {0:?}")]
    InvalidColor(Color),
}

/// Errors from the text formats in [`notation`](crate::notation).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("could not parse board location: {0}")]
    Location(String),

    #[error("could not parse player: {0}")]
    Player(String),

    #[error("board text has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has length {len}, not compatible with width {width}")]
    RowLength { row: usize, len: usize, width: usize },

    #[error("could not parse board character: {0:?}")]
    Character(char),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Move(#[from] MoveError),
}
