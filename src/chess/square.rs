//! Board coordinates.
//!
//! Squares are addressed either by algebraic name (`"e4"`), by zero-based
//! `(file, rank)` pair, or by index `rank * 8 + file` (a1 = 0, h8 = 63).

use super::error::ChessError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    pub file: u8, // 0-7 corresponding to a-h
    pub rank: u8, // 0-7 corresponding to 1-8
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Result<Self, ChessError> {
        if file > 7 {
            return Err(ChessError::OutOfRange(format!(
                "File must be 0-7, got {}",
                file
            )));
        }
        if rank > 7 {
            return Err(ChessError::OutOfRange(format!(
                "Rank must be 0-7, got {}",
                rank
            )));
        }

        Ok(Self { file, rank })
    }

    /// Create a square without validation (for internal use when bounds are guaranteed)
    pub const fn new_unchecked(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    /// Create a square from file and rank characters
    pub fn from_chars(file: char, rank: char) -> Result<Self, ChessError> {
        if !('a'..='h').contains(&file) {
            return Err(ChessError::InvalidSquare(format!(
                "Invalid file '{}'. Must be a-h.",
                file
            )));
        }

        if !('1'..='8').contains(&rank) {
            return Err(ChessError::InvalidSquare(format!(
                "Invalid rank '{}'. Must be 1-8.",
                rank
            )));
        }

        Ok(Square {
            file: file as u8 - b'a',
            rank: rank as u8 - b'1',
        })
    }

    pub fn from_index(index: usize) -> Result<Self, ChessError> {
        if index > 63 {
            return Err(ChessError::OutOfRange(format!(
                "Square index must be 0-63, got {}",
                index
            )));
        }
        Ok(Self::new_unchecked((index % 8) as u8, (index / 8) as u8))
    }

    pub fn index(&self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    pub fn file_char(&self) -> char {
        (self.file + b'a') as char
    }

    pub fn rank_char(&self) -> char {
        (self.rank + b'1') as char
    }

    /// The square `df` files and `dr` ranks away, if it is on the board
    pub fn offset(&self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::new_unchecked(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// All 64 squares, a1 first, h8 last
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Square { file, rank }))
    }
}

impl Ord for Square {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Self::from_chars(file, rank),
            _ => Err(ChessError::InvalidSquare(format!(
                "Square must be exactly 2 characters (e.g., 'e4'), got '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Square {
    type Error = ChessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

/// Algebraic square name to index `rank * 8 + file`
pub fn to_index(square: &str) -> Result<usize, ChessError> {
    Ok(square.parse::<Square>()?.index())
}

/// Index `0..=63` to algebraic square name
pub fn to_square(index: usize) -> Result<String, ChessError> {
    Ok(Square::from_index(index)?.to_string())
}

/// Algebraic square name to zero-based `(file, rank)`
pub fn to_coordinate(square: &str) -> Result<(u8, u8), ChessError> {
    let square = square.parse::<Square>()?;
    Ok((square.file, square.rank))
}

/// Zero-based `(file, rank)` to algebraic square name
pub fn from_coordinate(file: u8, rank: u8) -> Result<String, ChessError> {
    Ok(Square::new(file, rank)?.to_string())
}
