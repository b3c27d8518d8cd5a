//! Move execution.
//!
//! Applies a move the legality filter has already accepted. Nothing here
//! re-checks legality: given a legal move it produces the exact successor
//! position, including every piece of FEN bookkeeping.

use super::error::{ChessError, Result};
use super::moves::Move;
use super::movegen::is_en_passant_target;
use super::piece::{Color, Piece, PieceType};
use super::position::{CastleSide, Position};
use super::square::Square;

/// What kind of move was executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    DoublePawnPush,
    EnPassant,
    Castle(CastleSide),
}

/// Summary of an executed move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// The piece as it stood on the origin square
    pub moved: Piece,
    /// Captured piece, including a pawn taken en passant
    pub captured: Option<Piece>,
    /// Piece type a pawn became on its last rank
    pub promoted_to: Option<PieceType>,
    pub kind: MoveKind,
}

impl AppliedMove {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Apply a legal move, returning the successor position
///
/// The input position is left untouched. Fails only when `mv.from` is empty.
pub fn apply(position: &Position, mv: Move) -> Result<Position> {
    let mut next = position.clone();
    execute(&mut next, mv)?;
    Ok(next)
}

/// Apply a legal move in place
///
/// Reserved for copies the caller owns outright: the scratch clone of a
/// legality check, or the fresh clone inside [`apply`].
pub(crate) fn execute(position: &mut Position, mv: Move) -> Result<AppliedMove> {
    let piece = position.piece_at(mv.from).ok_or_else(|| {
        let from_square = mv.from;
        ChessError::IllegalMove(format!("No piece at source square {from_square}"))
    })?;

    let kind = classify(position, mv, piece);
    let promoted_to = promotion_for(mv, piece);
    let is_capture = kind == MoveKind::EnPassant || position.piece_at(mv.to).is_some();
    let (halfmove_clock, fullmove_number) = next_move_counters(position, piece, is_capture)?;

    let captured = match kind {
        MoveKind::EnPassant => {
            let captured_square = Square::new_unchecked(mv.to.file, mv.from.rank);
            let captured = position.piece_at(captured_square);
            position.set_piece(captured_square, None);
            captured
        }
        _ => position.piece_at(mv.to),
    };

    update_castling_rights(position, mv, piece);

    let placed = match promoted_to {
        Some(piece_type) => Piece::new(piece_type, piece.color),
        None => piece,
    };
    position.set_piece(mv.from, None);
    position.set_piece(mv.to, Some(placed));

    if let MoveKind::Castle(side) = kind {
        move_castling_rook(position, mv.from.rank, side);
    }

    position.set_en_passant_target(match kind {
        MoveKind::DoublePawnPush => {
            let skipped_rank = (mv.from.rank + mv.to.rank) / 2;
            Some(Square::new_unchecked(mv.from.file, skipped_rank))
        }
        _ => None,
    });

    position.set_halfmove_clock(halfmove_clock);
    position.set_fullmove_number(fullmove_number);
    position.set_side_to_move(piece.color.opposite());

    Ok(AppliedMove {
        moved: piece,
        captured,
        promoted_to,
        kind,
    })
}

fn classify(position: &Position, mv: Move, piece: Piece) -> MoveKind {
    match piece.piece_type {
        PieceType::King if mv.file_delta().abs() == 2 && mv.rank_delta() == 0 => {
            if mv.file_delta() > 0 {
                MoveKind::Castle(CastleSide::Kingside)
            } else {
                MoveKind::Castle(CastleSide::Queenside)
            }
        }
        PieceType::Pawn if mv.rank_delta().abs() == 2 => MoveKind::DoublePawnPush,
        PieceType::Pawn
            if mv.file_delta() != 0
                && position.piece_at(mv.to).is_none()
                && is_en_passant_target(position, mv.to, piece.color) =>
        {
            MoveKind::EnPassant
        }
        _ => MoveKind::Normal,
    }
}

/// A pawn reaching its last rank promotes, to a queen unless told otherwise
fn promotion_for(mv: Move, piece: Piece) -> Option<PieceType> {
    if piece.piece_type == PieceType::Pawn && mv.to.rank == piece.color.promotion_rank() {
        Some(mv.promotion.unwrap_or(PieceType::Queen))
    } else {
        None
    }
}

fn move_castling_rook(position: &mut Position, rank: u8, side: CastleSide) {
    let rook_from = Square::new_unchecked(side.rook_file(), rank);
    let rook_to = Square::new_unchecked(side.rook_target_file(), rank);

    if let Some(rook) = position.piece_at(rook_from) {
        position.set_piece(rook_from, None);
        position.set_piece(rook_to, Some(rook));
    }
}

fn update_castling_rights(position: &mut Position, mv: Move, piece: Piece) {
    let rights = position.castling_rights_mut();

    if piece.is_king() {
        rights.revoke_all(piece.color);
    }

    // a rook leaving its corner, or anything landing on one, ends that right
    rights.revoke_for_rook_square(mv.from);
    rights.revoke_for_rook_square(mv.to);
}

/// Counters after the move, checked before the board is touched
fn next_move_counters(
    position: &Position,
    piece: Piece,
    is_capture: bool,
) -> Result<(u32, u32)> {
    let halfmove_clock = if piece.piece_type == PieceType::Pawn || is_capture {
        0
    } else {
        position
            .halfmove_clock()
            .checked_add(1)
            .ok_or_else(|| ChessError::OutOfRange("Halfmove clock overflow".to_string()))?
    };

    let fullmove_number = if piece.color == Color::Black {
        position
            .fullmove_number()
            .checked_add(1)
            .ok_or_else(|| ChessError::OutOfRange("Fullmove number overflow".to_string()))?
    } else {
        position.fullmove_number()
    };

    Ok((halfmove_clock, fullmove_number))
}
