//! Attack detection.
//!
//! Pure geometry: whether some piece of a color could strike a square where
//! its pieces currently stand. Whose turn it is plays no part, and kings only
//! attack their eight neighbours (castling never attacks anything).

use super::piece::{Color, Piece, PieceType};
use super::position::Position;
use super::square::Square;

/// True iff any piece of `by_color` attacks `square`
pub fn is_attacked(position: &Position, square: Square, by_color: Color) -> bool {
    position
        .pieces()
        .filter(|(from, piece)| piece.color == by_color && *from != square)
        .any(|(from, piece)| piece_attacks(position, piece, from, square))
}

/// True iff `color`'s king is attacked by the other side
///
/// A side without a king is never in check.
pub fn is_in_check(position: &Position, color: Color) -> bool {
    position
        .king_square(color)
        .is_some_and(|king| is_attacked(position, king, color.opposite()))
}

fn piece_attacks(position: &Position, piece: Piece, from: Square, target: Square) -> bool {
    let df = target.file as i8 - from.file as i8;
    let dr = target.rank as i8 - from.rank as i8;

    match piece.piece_type {
        PieceType::Pawn => dr == piece.color.pawn_direction() && df.abs() == 1,
        PieceType::Knight => (df.abs() == 1 && dr.abs() == 2) || (df.abs() == 2 && dr.abs() == 1),
        PieceType::King => df.abs() <= 1 && dr.abs() <= 1,
        PieceType::Bishop => df.abs() == dr.abs() && ray_is_clear(position, from, df, dr),
        PieceType::Rook => (df == 0 || dr == 0) && ray_is_clear(position, from, df, dr),
        PieceType::Queen => {
            (df == 0 || dr == 0 || df.abs() == dr.abs()) && ray_is_clear(position, from, df, dr)
        }
    }
}

/// Every square strictly between `from` and `from + (df, dr)` is empty
///
/// The caller guarantees the displacement is a straight line.
fn ray_is_clear(position: &Position, from: Square, df: i8, dr: i8) -> bool {
    let step = (df.signum(), dr.signum());
    let distance = df.abs().max(dr.abs());

    (1..distance).all(|i| {
        from.offset(step.0 * i, step.1 * i)
            .is_some_and(|between| position.piece_at(between).is_none())
    })
}
