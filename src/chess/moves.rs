use super::error::ChessError;
use super::piece::{Color, PieceType};
use super::square::Square;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A move described by its coordinates: origin, destination and an optional
/// promotion piece. Whether it is legal depends on the position it is played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceType>,
}

impl Move {
    /// Create a new move with validation
    pub fn new(from: Square, to: Square, promotion: Option<PieceType>) -> Result<Self, ChessError> {
        if from == to {
            return Err(ChessError::InvalidMove(
                "Source and destination squares cannot be the same".to_string(),
            ));
        }

        if let Some(piece_type) = promotion {
            if !piece_type.is_promotion_target() {
                return Err(ChessError::InvalidMove(
                    "Cannot promote to King or Pawn".to_string(),
                ));
            }
        }

        Ok(Self {
            from,
            to,
            promotion,
        })
    }

    /// Create a new move without validation (for internal use when validity is guaranteed)
    pub const fn new_unchecked(from: Square, to: Square, promotion: Option<PieceType>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    /// Build a move from algebraic square names and an optional promotion code
    pub fn from_squares(from: &str, to: &str, promotion: Option<char>) -> Result<Self, ChessError> {
        let promotion = promotion
            .map(PieceType::from_promotion_code)
            .transpose()
            .map_err(|e| ChessError::InvalidMove(e.to_string()))?;
        Self::new(from.parse()?, to.parse()?, promotion)
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Change in file, destination minus origin
    pub fn file_delta(&self) -> i8 {
        self.to.file as i8 - self.from.file as i8
    }

    /// Change in rank, destination minus origin
    pub fn rank_delta(&self) -> i8 {
        self.to.rank as i8 - self.from.rank as i8
    }

    /// Parse move text with color context so castling shorthand resolves to the right rank
    pub fn from_str_with_color(s: &str, color: Color) -> Result<Self, ChessError> {
        let s = s.trim();
        let rank = color.back_rank();

        match s.to_uppercase().as_str() {
            "O-O" | "0-0" => {
                return Ok(Move::new_unchecked(
                    Square::new_unchecked(4, rank),
                    Square::new_unchecked(6, rank),
                    None,
                ));
            }
            "O-O-O" | "0-0-0" => {
                return Ok(Move::new_unchecked(
                    Square::new_unchecked(4, rank),
                    Square::new_unchecked(2, rank),
                    None,
                ));
            }
            _ => {}
        }

        if !s.is_ascii() || !(s.len() == 4 || s.len() == 5) {
            return Err(ChessError::InvalidMove(format!(
                "Invalid move format '{s}'. Expected 'e2e4', 'e7e8q' for promotion, or 'O-O'/'O-O-O' for castling."
            )));
        }

        let promotion = s[4..].chars().next();
        Self::from_squares(&s[0..2], &s[2..4], promotion)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ChessError;

    /// Coordinate form only (`e2e4`, `e7e8q`); castling shorthand needs a color,
    /// see [`Move::from_str_with_color`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with(['O', 'o', '0']) {
            return Err(ChessError::InvalidMove(format!(
                "Castling shorthand '{s}' needs the mover's color"
            )));
        }
        Self::from_str_with_color(s, Color::White)
    }
}
