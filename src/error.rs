//! Error type for everything outside the search itself.
//!
//! The search never fails; these variants cover board text, the referee and
//! the network session.

use thiserror::Error;

use crate::types::Move;

#[derive(Error, Debug)]
pub enum Error {
    #[error("board must have {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },

    #[error("board row {row} must have {expected} cells, got {actual}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid cell {ch:?} at row {row}, col {col}")]
    InvalidCell { row: usize, col: usize, ch: char },

    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("cannot pass while a legal move exists")]
    PassWithMoves,

    #[error("game is already over")]
    GameOver,

    #[error("unexpected message: expected {expected}, got {actual}")]
    UnexpectedMessage {
        expected: &'static str,
        actual: String,
    },

    #[error("connection closed by server")]
    ConnectionClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
