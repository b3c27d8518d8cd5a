// Re-export all public items
pub use self::attacks::{is_attacked, is_in_check};
pub use self::error::{ChessError, Result};
pub use self::executor::{apply, AppliedMove, MoveKind};
pub use self::game::{legal_moves, new_game, status, try_move, Engine, MoveRecord};
pub use self::legality::{is_legal, legal_destinations, legal_moves as all_legal_moves, perft, validate};
pub use self::movegen::pseudo_legal_destinations;
pub use self::moves::Move;
pub use self::notation::san;
pub use self::piece::{Color, Piece, PieceType};
pub use self::position::{CastleSide, CastlingRights, Position, STARTING_FEN};
pub use self::square::Square;
pub use self::status::GameStatus;

// Define submodules
mod attacks;
mod error;
mod executor;
mod game;
mod legality;
mod movegen;
mod moves;
mod notation;
mod piece;
mod position;
mod square;
mod status;

pub mod coordinates {
    //! String helpers for square names and board indices
    pub use super::square::{from_coordinate, to_coordinate, to_index, to_square};
}
