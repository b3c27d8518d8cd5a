//! Standard Algebraic Notation for move records.
//!
//! Only produced, never parsed.

use super::error::Result;
use super::executor::{execute, AppliedMove, MoveKind};
use super::legality::{legal_destinations, validate};
use super::moves::Move;
use super::piece::PieceType;
use super::position::{CastleSide, Position};
use super::status::{status, GameStatus};

/// SAN for a legal move played from `position`, e.g. `Nbd7`, `exd6`, `e8=Q+`, `O-O#`
pub fn san(position: &Position, mv: Move) -> Result<String> {
    validate(position, mv)?;

    let mut next = position.clone();
    let applied = execute(&mut next, mv)?;
    Ok(describe(position, mv, &applied, status(&next)))
}

/// SAN for a move already executed, given the position before it and the
/// status after it
pub(crate) fn describe(
    position: &Position,
    mv: Move,
    applied: &AppliedMove,
    after: GameStatus,
) -> String {
    let mut text = match applied.kind {
        MoveKind::Castle(CastleSide::Kingside) => "O-O".to_string(),
        MoveKind::Castle(CastleSide::Queenside) => "O-O-O".to_string(),
        _ => {
            let mut text = String::new();
            if applied.moved.piece_type == PieceType::Pawn {
                if applied.is_capture() {
                    text.push(mv.from.file_char());
                }
            } else {
                text.push(applied.moved.piece_type.letter());
                text.push_str(&disambiguation(position, mv));
            }
            if applied.is_capture() {
                text.push('x');
            }
            text.push_str(&mv.to.to_string());
            if let Some(promoted) = applied.promoted_to {
                text.push('=');
                text.push(promoted.letter());
            }
            text
        }
    };

    match after {
        GameStatus::Checkmate { .. } => text.push('#'),
        GameStatus::Ongoing { in_check: true } => text.push('+'),
        _ => {}
    }

    text
}

/// Origin file, rank or square needed to tell `mv` apart from twin moves
fn disambiguation(position: &Position, mv: Move) -> String {
    let Some(piece) = position.piece_at(mv.from) else {
        return String::new();
    };

    let rivals: Vec<_> = position
        .pieces()
        .filter(|&(square, other)| square != mv.from && other == piece)
        .filter(|&(square, _)| legal_destinations(position, square).contains(&mv.to))
        .map(|(square, _)| square)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|rival| rival.file != mv.from.file) {
        mv.from.file_char().to_string()
    } else if rivals.iter().all(|rival| rival.rank != mv.from.rank) {
        mv.from.rank_char().to_string()
    } else {
        mv.from.to_string()
    }
}
