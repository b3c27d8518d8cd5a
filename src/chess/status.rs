use super::attacks::is_in_check;
use super::legality::has_any_legal_move;
use super::piece::Color;
use super::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a position from the side to move's point of view
///
/// Fifty-move, repetition and material draws are not detected here; the
/// session layer owns the history those rules need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStatus {
    Ongoing { in_check: bool },
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    /// Whether the game is over
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Ongoing { .. })
    }

    /// Whether the side to move is in check (always true for checkmate)
    pub fn is_check(&self) -> bool {
        match self {
            GameStatus::Ongoing { in_check } => *in_check,
            GameStatus::Checkmate { .. } => true,
            GameStatus::Stalemate => false,
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing { in_check: false } => write!(f, "Ongoing"),
            GameStatus::Ongoing { in_check: true } => write!(f, "Check"),
            GameStatus::Checkmate { winner } => write!(f, "Checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "Stalemate"),
        }
    }
}

/// Classify the position for the side to move
pub fn status(position: &Position) -> GameStatus {
    let side_to_move = position.side_to_move();
    let in_check = is_in_check(position, side_to_move);

    if has_any_legal_move(position, side_to_move) {
        GameStatus::Ongoing { in_check }
    } else if in_check {
        GameStatus::Checkmate {
            winner: side_to_move.opposite(),
        }
    } else {
        GameStatus::Stalemate
    }
}
