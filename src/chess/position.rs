use super::error::ChessError;
use super::piece::{Color, Piece, PieceType};
use super::square::Square;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// FEN of the standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Which wing a castle goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// File of the rook's home square
    pub fn rook_file(&self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// File the king lands on
    pub fn king_target_file(&self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// File the rook lands on, the square the king crosses
    pub fn rook_target_file(&self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }
}

/// Castling rights for both players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    /// All four rights available
    pub const fn all() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    /// Parse the FEN castling field (`KQkq`, `Kq`, `-`, ...)
    ///
    /// Letters must be unique and in `KQkq` order, which is the only order
    /// [`CastlingRights::to_fen`] emits.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        if fen == "-" {
            return Ok(Self::none());
        }
        if fen.is_empty() {
            return Err(ChessError::MalformedFen(
                "Castling rights field cannot be empty".to_string(),
            ));
        }

        let expected_order = ['K', 'Q', 'k', 'q'];
        let mut rights = Self::none();
        let mut last_index: Option<usize> = None;

        for c in fen.chars() {
            let index = expected_order.iter().position(|&x| x == c).ok_or_else(|| {
                ChessError::MalformedFen(format!(
                    "Invalid character '{c}' in castling rights '{fen}' (valid: K, Q, k, q, or '-' for none)"
                ))
            })?;
            if last_index.is_some_and(|last| index <= last) {
                return Err(ChessError::MalformedFen(format!(
                    "Castling rights '{fen}' repeat a letter or are not in KQkq order"
                )));
            }
            last_index = Some(index);

            match c {
                'K' => rights.white_kingside = true,
                'Q' => rights.white_queenside = true,
                'k' => rights.black_kingside = true,
                _ => rights.black_queenside = true,
            }
        }

        Ok(rights)
    }

    /// Convert to FEN notation
    pub fn to_fen(&self) -> String {
        let mut result = String::new();

        if self.white_kingside {
            result.push('K');
        }
        if self.white_queenside {
            result.push('Q');
        }
        if self.black_kingside {
            result.push('k');
        }
        if self.black_queenside {
            result.push('q');
        }

        if result.is_empty() {
            "-".to_string()
        } else {
            result
        }
    }

    pub fn has(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside,
            (Color::White, CastleSide::Queenside) => self.white_queenside,
            (Color::Black, CastleSide::Kingside) => self.black_kingside,
            (Color::Black, CastleSide::Queenside) => self.black_queenside,
        }
    }

    /// Remove castling rights for a color (when king moves)
    pub fn revoke_all(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }

    /// Remove the right tied to a rook home corner, if `square` is one
    pub fn revoke_for_rook_square(&mut self, square: Square) {
        match (square.file, square.rank) {
            (0, 0) => self.white_queenside = false, // a1
            (7, 0) => self.white_kingside = false,  // h1
            (0, 7) => self.black_queenside = false, // a8
            (7, 7) => self.black_kingside = false,  // h8
            _ => {}
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

/// A complete game state: piece placement plus everything FEN records
///
/// Positions are values. Engine operations take `&Position` and hand back a
/// new one; the only in-place mutation happens on private scratch copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// squares[rank][file] where rank 0 = rank 1, file 0 = file a
    squares: [[Option<Piece>; 8]; 8],

    side_to_move: Color,

    castling_rights: CastlingRights,

    /// Square skipped by the previous ply's double pawn push
    en_passant_target: Option<Square>,

    /// Plies since the last capture or pawn move
    halfmove_clock: u32,

    /// Increments after Black's move
    fullmove_number: u32,
}

impl Position {
    /// The standard starting position
    pub fn starting() -> Self {
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        let mut squares = [[None; 8]; 8];
        for (file, &piece_type) in back_rank.iter().enumerate() {
            squares[0][file] = Some(Piece::new(piece_type, Color::White));
            squares[1][file] = Some(Piece::new(PieceType::Pawn, Color::White));
            squares[6][file] = Some(Piece::new(PieceType::Pawn, Color::Black));
            squares[7][file] = Some(Piece::new(piece_type, Color::Black));
        }

        Self {
            squares,
            side_to_move: Color::White,
            castling_rights: CastlingRights::all(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.rank as usize][square.file as usize]
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Every occupied square with its piece, a1 to h8
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Square of `color`'s king, if it has one
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.is_king() && piece.color == color)
            .map(|(square, _)| square)
    }

    pub(crate) fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.rank as usize][square.file as usize] = piece;
    }

    pub(crate) fn castling_rights_mut(&mut self) -> &mut CastlingRights {
        &mut self.castling_rights
    }

    pub(crate) fn set_en_passant_target(&mut self, target: Option<Square>) {
        self.en_passant_target = target;
    }

    pub(crate) fn set_halfmove_clock(&mut self, value: u32) {
        self.halfmove_clock = value;
    }

    pub(crate) fn set_fullmove_number(&mut self, value: u32) {
        self.fullmove_number = value;
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Create a position from a FEN (Forsyth-Edwards Notation) string
    /// FEN format: piece_placement active_color castling_rights en_passant halfmove fullmove
    /// Example: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    pub fn from_fen(fen: &str) -> Result<Position, ChessError> {
        let fen = fen.trim();
        if fen.is_empty() {
            return Err(ChessError::MalformedFen(
                "FEN string cannot be empty".to_string(),
            ));
        }

        let parts: Vec<&str> = fen.split_whitespace().collect();
        let [placement, active_color, castling, en_passant, halfmove_str, fullmove_str] =
            parts.as_slice()
        else {
            let found_count = parts.len();
            return Err(ChessError::MalformedFen(format!(
                "FEN must have exactly 6 fields (piece_placement active_color castling_rights en_passant halfmove fullmove), found {found_count}"
            )));
        };

        let squares = Self::parse_placement(placement)?;

        let side_to_move = match *active_color {
            "w" => Color::White,
            "b" => Color::Black,
            _ => {
                return Err(ChessError::MalformedFen(format!(
                    "Invalid active color '{active_color}' (must be 'w' for White or 'b' for Black)"
                )))
            }
        };

        let castling_rights = CastlingRights::from_fen(castling)?;

        let en_passant_target = if *en_passant == "-" {
            None
        } else {
            let square = Square::from_str(en_passant).map_err(|e| {
                ChessError::MalformedFen(format!("Invalid en passant target '{en_passant}': {e}"))
            })?;
            if square.rank != 2 && square.rank != 5 {
                return Err(ChessError::MalformedFen(format!(
                    "Invalid en passant target '{en_passant}' (en passant squares must be on rank 3 or 6)"
                )));
            }
            Some(square)
        };

        let halfmove_clock = halfmove_str.parse::<u32>().map_err(|e| {
            ChessError::MalformedFen(format!(
                "Invalid halfmove clock '{halfmove_str}' (must be a non-negative integer): {e}"
            ))
        })?;

        let fullmove_number = fullmove_str.parse::<u32>().map_err(|e| {
            ChessError::MalformedFen(format!(
                "Invalid fullmove number '{fullmove_str}' (must be a positive integer): {e}"
            ))
        })?;
        if fullmove_number == 0 {
            return Err(ChessError::MalformedFen(
                "Fullmove number must be at least 1".to_string(),
            ));
        }

        Ok(Position {
            squares,
            side_to_move,
            castling_rights,
            en_passant_target,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_placement(placement: &str) -> Result<[[Option<Piece>; 8]; 8], ChessError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            let found_ranks = ranks.len();
            return Err(ChessError::MalformedFen(format!(
                "Piece placement must have exactly 8 ranks separated by '/', found {found_ranks}"
            )));
        }

        let mut squares = [[None; 8]; 8];

        // FEN lists rank 8 first
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let board_rank = 7 - rank_idx;
            let fen_rank_number = 8 - rank_idx;
            let mut file = 0usize;

            let mut previous_was_digit = false;

            for c in rank_str.chars() {
                if let Some(empty_squares) = c.to_digit(10) {
                    let empty_squares = empty_squares as usize;
                    if !(1..=8).contains(&empty_squares) {
                        return Err(ChessError::MalformedFen(format!(
                            "Invalid empty square count '{c}' in rank {fen_rank_number} (must be 1-8)"
                        )));
                    }
                    // a run of empty squares is always written as a single digit
                    if previous_was_digit {
                        return Err(ChessError::MalformedFen(format!(
                            "Adjacent empty square counts in rank {fen_rank_number}"
                        )));
                    }
                    previous_was_digit = true;
                    file += empty_squares;
                } else {
                    previous_was_digit = false;
                    let piece = Piece::from_fen_char(c).map_err(|_| {
                        ChessError::MalformedFen(format!(
                            "Invalid piece character '{c}' in rank {fen_rank_number} (valid pieces: KQRBNPkqrbnp)"
                        ))
                    })?;
                    if file < 8 {
                        squares[board_rank][file] = Some(piece);
                    }
                    file += 1;
                }

                if file > 8 {
                    return Err(ChessError::MalformedFen(format!(
                        "Rank {fen_rank_number} has more than 8 squares"
                    )));
                }
            }

            if file != 8 {
                return Err(ChessError::MalformedFen(format!(
                    "Rank {fen_rank_number} must represent exactly 8 squares, found {file}"
                )));
            }
        }

        Ok(squares)
    }

    /// Converts the position to FEN notation
    pub fn to_fen(&self) -> String {
        let piece_placement = self.generate_piece_placement();
        let active_color = self.side_to_move.fen_char();
        let castling_rights = self.castling_rights.to_fen();
        let en_passant = match self.en_passant_target {
            Some(square) => square.to_string(),
            None => "-".to_string(),
        };
        let halfmove = self.halfmove_clock;
        let fullmove = self.fullmove_number;

        format!(
            "{piece_placement} {active_color} {castling_rights} {en_passant} {halfmove} {fullmove}"
        )
    }

    /// Piece placement field: ranks 8 down to 1, runs of empty squares as digits
    fn generate_piece_placement(&self) -> String {
        let mut ranks = Vec::with_capacity(8);

        for rank_idx in (0..8).rev() {
            let mut rank_string = String::new();
            let mut empty_count = 0;

            for file_idx in 0..8 {
                match self.squares[rank_idx][file_idx] {
                    Some(piece) => {
                        if empty_count > 0 {
                            rank_string.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        rank_string.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                rank_string.push_str(&empty_count.to_string());
            }

            ranks.push(rank_string);
        }

        ranks.join("/")
    }

    /// SHA-256 of the FEN as lowercase hex
    ///
    /// Two parties holding the same position compute the same hash, so a
    /// client can check its local prediction against the authoritative result.
    pub fn state_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.to_fen().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Compare against a hash received from elsewhere, ignoring hex case
    pub fn verify_state_hash(&self, expected_hash: &str) -> bool {
        self.state_hash().eq_ignore_ascii_case(expected_hash)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
