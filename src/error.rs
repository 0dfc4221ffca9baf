//! Error types for the rules engine.
//!
//! Every interaction error is recoverable: it is reported to the caller and
//! leaves the board, scores and turn untouched.

use thiserror::Error;

/// Rejected interaction with the game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckersError {
    #[error("{x};{y} is not a valid board position")]
    OutOfBounds { x: i32, y: i32 },

    /// Selection of an empty cell or an opponent's piece.
    #[error("no piece of the current player at {x};{y}")]
    NotCurrentPlayersPiece { x: i32, y: i32 },

    #[error("{x};{y} is not a legal destination for the selected piece")]
    IllegalDestination { x: i32, y: i32 },

    #[error("no piece is selected")]
    NoOpenTransaction,

    #[error("it is the AI's turn")]
    AiTurn,

    #[error("game is already over")]
    GameOver,

    #[error("no AI move is waiting to be committed")]
    NoPendingAiMove,
}

/// Failure to read a saved game. The board is left as it was.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("malformed save document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown player id {0}")]
    UnknownPlayer(i64),

    #[error("save has no side to move")]
    NoSideToMove,

    #[error("invalid cell value {value} at {x};{y}")]
    InvalidCell { x: usize, y: usize, value: i8 },
}

pub type CheckersResult<T> = Result<T, CheckersError>;
