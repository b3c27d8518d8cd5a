//! Session-facing entry points.
//!
//! The free functions are what a game server calls with the authoritative
//! position it owns. [`Engine`] binds the same operations to a
//! [`RulesConfig`] and produces [`MoveRecord`]s ready to broadcast.

use super::error::{ChessError, Result};
use super::legality::{legal_destinations, validate};
use super::moves::Move;
use super::executor::execute;
use super::notation::describe;
use super::piece::{Color, Piece, PieceType};
use super::position::Position;
use super::square::Square;
use super::status::GameStatus;
use crate::config::RulesConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Start a game from `fen`, or from the standard position when `None`
pub fn new_game(fen: Option<&str>) -> Result<Position> {
    match fen {
        Some(fen) => Position::from_fen(fen),
        None => Ok(Position::starting()),
    }
}

/// Legal destinations for the piece on `square`
///
/// Empty when the square is empty or holds a piece of the side not on move.
pub fn legal_moves(position: &Position, square: Square) -> BTreeSet<Square> {
    match position.piece_at(square) {
        Some(piece) if piece.color == position.side_to_move() => {
            legal_destinations(position, square)
        }
        _ => BTreeSet::new(),
    }
}

/// Validate and play `mv`, returning the successor and its status
///
/// On rejection the caller's position is unchanged and the error carries the
/// reason.
#[instrument(level = "debug", skip(position), fields(mv = %mv))]
pub fn try_move(position: &Position, mv: Move) -> Result<(Position, GameStatus)> {
    if let Err(e) = validate(position, mv) {
        debug!(reason = %e, "move rejected");
        return Err(e);
    }

    let next = super::executor::apply(position, mv)?;
    let status = super::status::status(&next);
    debug!(%status, "move accepted");
    Ok((next, status))
}

/// Classify `position` for the side to move
pub fn status(position: &Position) -> GameStatus {
    super::status::status(position)
}

/// Outcome of one accepted move, as broadcast to both players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// Coordinate form, e.g. `e7e8q`
    pub uci: String,
    /// Standard Algebraic Notation
    pub san: String,
    pub color: Color,
    pub piece: Piece,
    pub captured: Option<Piece>,
    /// Position after the move
    pub fen: String,
    /// SHA-256 of `fen`, for clients checking an optimistic update
    pub state_hash: String,
    pub status: GameStatus,
    pub is_check: bool,
}

/// Rules engine bound to a configuration
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: RulesConfig,
}

impl Engine {
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Start a game from `fen`, or from the configured start position
    pub fn new_game(&self, fen: Option<&str>) -> Result<Position> {
        new_game(Some(fen.unwrap_or(self.config.start_fen.as_str())))
    }

    pub fn legal_moves(&self, position: &Position, square: Square) -> BTreeSet<Square> {
        legal_moves(position, square)
    }

    pub fn status(&self, position: &Position) -> GameStatus {
        status(position)
    }

    pub fn try_move(
        &self,
        position: &Position,
        mv: Move,
    ) -> Result<(Position, GameStatus)> {
        self.check_promotion_choice(position, mv)?;
        try_move(position, mv)
    }

    /// Play `mv` and describe the result
    #[instrument(level = "debug", skip(self, position), fields(mv = %mv))]
    pub fn play(&self, position: &Position, mv: Move) -> Result<MoveRecord> {
        self.check_promotion_choice(position, mv)?;
        if let Err(e) = validate(position, mv) {
            debug!(reason = %e, "move rejected");
            return Err(e);
        }

        let mut next = position.clone();
        let applied = execute(&mut next, mv)?;
        let status = super::status::status(&next);
        debug!(%status, "move accepted");

        Ok(MoveRecord {
            from: mv.from,
            to: mv.to,
            uci: mv.to_string(),
            san: describe(position, mv, &applied, status),
            color: applied.moved.color,
            piece: applied.moved,
            captured: applied.captured,
            fen: next.to_fen(),
            state_hash: next.state_hash(),
            is_check: status.is_check(),
            status,
        })
    }

    /// Parse `text` in coordinate or castling form and play it
    pub fn play_uci(&self, position: &Position, text: &str) -> Result<MoveRecord> {
        let mv = Move::from_str_with_color(text.trim(), position.side_to_move())?;
        self.play(position, mv)
    }

    fn check_promotion_choice(&self, position: &Position, mv: Move) -> Result<()> {
        if !self.config.require_promotion_choice || mv.promotion.is_some() {
            return Ok(());
        }

        let promotes = position.piece_at(mv.from).is_some_and(|piece| {
            piece.piece_type == PieceType::Pawn && mv.to.rank == piece.color.promotion_rank()
        });
        if promotes {
            debug!(%mv, "promotion piece missing");
            return Err(ChessError::IllegalMove(format!(
                "{} reaches the last rank without naming a promotion piece",
                mv
            )));
        }
        Ok(())
    }
}
