//! Pseudo-legal move generation.
//!
//! Destinations respect how each piece moves and what blocks it, but not
//! whether the mover's own king is left attacked. That is the legality
//! filter's job.

use super::attacks::is_attacked;
use super::piece::{Color, Piece, PieceType};
use super::position::{CastleSide, Position};
use super::square::Square;
use std::collections::BTreeSet;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Squares the piece on `from` may move to, ignoring checks on its own king
///
/// Returns an empty set for an empty square. Squares holding a king of
/// either color never appear: kings are mated, not captured.
pub fn pseudo_legal_destinations(position: &Position, from: Square) -> BTreeSet<Square> {
    let Some(piece) = position.piece_at(from) else {
        return BTreeSet::new();
    };

    let mut destinations = match piece.piece_type {
        PieceType::Pawn => pawn_destinations(position, from, piece.color),
        PieceType::Knight => step_destinations(position, from, piece.color, &KNIGHT_OFFSETS),
        PieceType::Bishop => sliding_destinations(position, from, piece.color, &DIAGONALS),
        PieceType::Rook => sliding_destinations(position, from, piece.color, &ORTHOGONALS),
        PieceType::Queen => {
            let mut squares = sliding_destinations(position, from, piece.color, &DIAGONALS);
            squares.extend(sliding_destinations(position, from, piece.color, &ORTHOGONALS));
            squares
        }
        PieceType::King => {
            let mut squares = step_destinations(position, from, piece.color, &KING_OFFSETS);
            squares.extend(castling_destinations(position, from, piece.color));
            squares
        }
    };

    destinations.retain(|&square| !position.piece_at(square).is_some_and(|p| p.is_king()));
    destinations
}

fn is_enemy(piece: Option<Piece>, color: Color) -> bool {
    piece.is_some_and(|p| p.color != color)
}

/// Whether a `color` pawn moving diagonally onto `target` captures en passant
pub(crate) fn is_en_passant_target(position: &Position, target: Square, color: Color) -> bool {
    // only the side that did not make the double step can use the target
    let capture_rank = color.promotion_rank() as i8 - 2 * color.pawn_direction();
    position.en_passant_target() == Some(target) && target.rank as i8 == capture_rank
}

fn pawn_destinations(position: &Position, from: Square, color: Color) -> BTreeSet<Square> {
    let mut squares = BTreeSet::new();
    let direction = color.pawn_direction();

    if let Some(one_step) = from.offset(0, direction) {
        if position.piece_at(one_step).is_none() {
            squares.insert(one_step);

            if from.rank == color.pawn_start_rank() {
                if let Some(two_step) = one_step.offset(0, direction) {
                    if position.piece_at(two_step).is_none() {
                        squares.insert(two_step);
                    }
                }
            }
        }
    }

    for file_delta in [-1, 1] {
        let Some(target) = from.offset(file_delta, direction) else {
            continue;
        };
        if is_enemy(position.piece_at(target), color)
            || is_en_passant_target(position, target, color)
        {
            squares.insert(target);
        }
    }

    squares
}

fn step_destinations(
    position: &Position,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
) -> BTreeSet<Square> {
    offsets
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .filter(|&target| !position.piece_at(target).is_some_and(|p| p.color == color))
        .collect()
}

fn sliding_destinations(
    position: &Position,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
) -> BTreeSet<Square> {
    let mut squares = BTreeSet::new();

    for &(df, dr) in directions {
        let mut current = from;
        while let Some(next) = current.offset(df, dr) {
            match position.piece_at(next) {
                None => {
                    squares.insert(next);
                }
                Some(blocker) => {
                    if blocker.color != color {
                        squares.insert(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }

    squares
}

/// Castling targets for the king on `from`
///
/// Requires the right, the king on its home square, a same-color rook in the
/// corner, an empty path between them, and none of the king's start, crossed
/// and landing squares attacked.
fn castling_destinations(position: &Position, from: Square, color: Color) -> Vec<Square> {
    let home_rank = color.back_rank();
    if from != Square::new_unchecked(4, home_rank) {
        return Vec::new();
    }

    let opponent = color.opposite();
    let rights = position.castling_rights();
    let mut targets = Vec::new();
    let mut king_attacked: Option<bool> = None;

    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if !rights.has(color, side) {
            continue;
        }

        let rook_square = Square::new_unchecked(side.rook_file(), home_rank);
        if position.piece_at(rook_square) != Some(Piece::new(PieceType::Rook, color)) {
            continue;
        }

        let (low, high) = if side.rook_file() > from.file {
            (from.file + 1, side.rook_file())
        } else {
            (side.rook_file() + 1, from.file)
        };
        let path_clear = (low..high)
            .all(|file| position.piece_at(Square::new_unchecked(file, home_rank)).is_none());
        if !path_clear {
            continue;
        }

        if *king_attacked.get_or_insert_with(|| is_attacked(position, from, opponent)) {
            return Vec::new();
        }

        let crossed = Square::new_unchecked(side.rook_target_file(), home_rank);
        let landing = Square::new_unchecked(side.king_target_file(), home_rank);
        if !is_attacked(position, crossed, opponent) && !is_attacked(position, landing, opponent) {
            targets.push(landing);
        }
    }

    targets
}
