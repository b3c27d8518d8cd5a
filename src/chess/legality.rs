//! Legal move filtering.
//!
//! A pseudo-legal move is legal when, played on a scratch copy of the
//! position, it leaves the mover's king unattacked. The authoritative
//! position is never touched here.

use super::attacks::is_in_check;
use super::error::{ChessError, Result};
use super::executor::execute;
use super::moves::Move;
use super::movegen::pseudo_legal_destinations;
use super::piece::{Color, PieceType};
use super::position::Position;
use super::square::Square;
use std::collections::BTreeSet;
use tracing::trace;

/// Check a move against every rule, reporting the first one it breaks
pub fn validate(position: &Position, mv: Move) -> Result<()> {
    let piece = position.piece_at(mv.from).ok_or_else(|| {
        ChessError::IllegalMove(format!("No piece at source square {}", mv.from))
    })?;

    let side_to_move = position.side_to_move();
    if piece.color != side_to_move {
        return Err(ChessError::IllegalMove(format!(
            "Cannot move {} piece when it's {}'s turn",
            piece.color, side_to_move
        )));
    }

    if position.piece_at(mv.to).is_some_and(|target| target.is_king()) {
        return Err(ChessError::IllegalMove(format!(
            "Cannot capture the king on {}",
            mv.to
        )));
    }

    if !pseudo_legal_destinations(position, mv.from).contains(&mv.to) {
        return Err(ChessError::IllegalMove(format!(
            "{} on {} cannot move to {}",
            piece.piece_type, mv.from, mv.to
        )));
    }

    if let Some(promotion) = mv.promotion {
        let reaches_last_rank = piece.piece_type == PieceType::Pawn
            && mv.to.rank == piece.color.promotion_rank();
        if !reaches_last_rank {
            return Err(ChessError::IllegalMove(
                "Only a pawn reaching the last rank can promote".to_string(),
            ));
        }
        if !promotion.is_promotion_target() {
            return Err(ChessError::IllegalMove(
                "Cannot promote to King or Pawn".to_string(),
            ));
        }
    }

    if leaves_king_attacked(position, mv, side_to_move) {
        return Err(ChessError::IllegalMove(format!(
            "{} leaves the {} king in check",
            mv, side_to_move
        )));
    }

    Ok(())
}

/// Whether `mv` is legal for the side to move
pub fn is_legal(position: &Position, mv: Move) -> bool {
    match validate(position, mv) {
        Ok(()) => true,
        Err(e) => {
            trace!(%mv, reason = %e, "move rejected");
            false
        }
    }
}

/// Simulate `mv` on one scratch clone and test the mover's king
fn leaves_king_attacked(position: &Position, mv: Move, mover: Color) -> bool {
    let mut scratch = position.clone();
    match execute(&mut scratch, mv) {
        Ok(_) => is_in_check(&scratch, mover),
        Err(_) => true,
    }
}

/// Legal destinations of the piece on `from`
///
/// Works for either color's pieces regardless of whose turn it is, so
/// [`has_any_legal_move`] can ask about the side not on move.
pub fn legal_destinations(position: &Position, from: Square) -> BTreeSet<Square> {
    let Some(piece) = position.piece_at(from) else {
        return BTreeSet::new();
    };

    pseudo_legal_destinations(position, from)
        .into_iter()
        .filter(|&to| {
            !leaves_king_attacked(position, Move::new_unchecked(from, to, None), piece.color)
        })
        .collect()
}

/// Whether `color` has at least one legal move; stops at the first found
pub fn has_any_legal_move(position: &Position, color: Color) -> bool {
    position
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .any(|(from, _)| {
            pseudo_legal_destinations(position, from)
                .into_iter()
                .any(|to| {
                    !leaves_king_attacked(position, Move::new_unchecked(from, to, None), color)
                })
        })
}

/// Every legal move for the side to move
///
/// A pawn move onto the last rank is listed once per promotion piece.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let side_to_move = position.side_to_move();
    let mut moves = Vec::new();

    for (from, piece) in position.pieces() {
        if piece.color != side_to_move {
            continue;
        }
        let promotes = piece.piece_type == PieceType::Pawn;
        for to in legal_destinations(position, from) {
            if promotes && to.rank == side_to_move.promotion_rank() {
                moves.extend(
                    PieceType::PROMOTIONS
                        .iter()
                        .map(|&promotion| Move::new_unchecked(from, to, Some(promotion))),
                );
            } else {
                moves.push(Move::new_unchecked(from, to, None));
            }
        }
    }

    moves
}

/// Count leaf nodes of the legal move tree `depth` plies deep
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| {
            let mut next = position.clone();
            match execute(&mut next, mv) {
                Ok(_) => perft(&next, depth - 1),
                Err(_) => 0,
            }
        })
        .sum()
}
