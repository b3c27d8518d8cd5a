use thiserror::Error;

/// Errors reported by the rules engine.
///
/// Every variant is a recoverable value handed back to the caller. A rejected
/// move never changes the position it was tried against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid piece type: {0}")]
    InvalidPieceType(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Malformed FEN: {0}")]
    MalformedFen(String),

    #[error("Illegal move: {0}")]
    IllegalMove(String),
}

/// Result type for chess operations
pub type Result<T> = std::result::Result<T, ChessError>;
