use crate::chess::{Color, Piece, PieceType, Position, Square};
use std::fmt::Write;

/// Render the board as text, rank 8 on top for White and rank 1 on top for Black
pub fn render_board(position: &Position, perspective: Color, unicode: bool) -> String {
    let (ranks, files): (Vec<u8>, Vec<u8>) = match perspective {
        Color::White => ((0..8).rev().collect(), (0..8).collect()),
        Color::Black => ((0..8).collect(), (0..8).rev().collect()),
    };

    let mut out = String::new();
    out.push_str("  ┌─┬─┬─┬─┬─┬─┬─┬─┐\n");
    for (row, &rank) in ranks.iter().enumerate() {
        let rank_number = rank + 1;
        let _ = write!(out, "{} │", rank_number);
        for &file in &files {
            let symbol = match position.piece_at(Square::new_unchecked(file, rank)) {
                Some(piece) if unicode => piece_to_unicode_char(piece),
                Some(piece) => piece.to_fen_char(),
                None => ' ',
            };
            let _ = write!(out, "{}│", symbol);
        }
        let _ = writeln!(out, " {}", rank_number);

        if row < 7 {
            out.push_str("  ├─┼─┼─┼─┼─┼─┼─┼─┤\n");
        }
    }
    out.push_str("  └─┴─┴─┴─┴─┴─┴─┴─┘\n");

    out.push_str("  ");
    for &file in &files {
        let _ = write!(out, " {}", (b'a' + file) as char);
    }
    out.push('\n');

    let _ = writeln!(out, "To move: {}", position.side_to_move());
    let _ = writeln!(out, "Move #: {}", position.fullmove_number());
    if position.halfmove_clock() > 0 {
        let _ = writeln!(
            out,
            "Halfmove clock: {} (50-move rule)",
            position.halfmove_clock()
        );
    }

    out
}

fn piece_to_unicode_char(piece: Piece) -> char {
    match (piece.color, piece.piece_type) {
        (Color::White, PieceType::King) => '♔',
        (Color::White, PieceType::Queen) => '♕',
        (Color::White, PieceType::Rook) => '♖',
        (Color::White, PieceType::Bishop) => '♗',
        (Color::White, PieceType::Knight) => '♘',
        (Color::White, PieceType::Pawn) => '♙',
        (Color::Black, PieceType::King) => '♚',
        (Color::Black, PieceType::Queen) => '♛',
        (Color::Black, PieceType::Rook) => '♜',
        (Color::Black, PieceType::Bishop) => '♝',
        (Color::Black, PieceType::Knight) => '♞',
        (Color::Black, PieceType::Pawn) => '♟',
    }
}

pub fn supports_unicode() -> bool {
    // Simple heuristic: check if TERM contains "xterm" or if we're in a modern terminal
    std::env::var("TERM")
        .map(|term| {
            term.contains("xterm")
                || term.contains("screen")
                || term.contains("tmux")
                || term == "alacritty"
                || term == "kitty"
        })
        .unwrap_or(false)
        || std::env::var("TERM_PROGRAM").is_ok()
}
