use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chess-rules")]
#[command(about = "Inspect positions and play moves against the chess rules engine")]
pub struct Cli {
    /// Rules configuration file (defaults to the per-user config file)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a FEN string and print it back in canonical form
    ///
    /// Without an argument the configured start position is used.
    ///
    /// Examples:
    ///   chess-rules fen
    ///   chess-rules fen "8/8/8/8/8/8/8/K6k w - - 0 1" --board
    Fen {
        /// Position in Forsyth-Edwards Notation
        fen: Option<String>,
        /// Also draw the board
        #[arg(short, long)]
        board: bool,
    },

    /// List legal moves
    ///
    /// With a square, prints the legal destinations of the piece on it.
    /// Otherwise prints every legal move for the side to move.
    ///
    /// Examples:
    ///   chess-rules moves
    ///   chess-rules moves e2
    ///   chess-rules moves g1 --fen "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    Moves {
        /// Square of the piece to move (e.g., e2)
        square: Option<String>,
        /// Position to inspect. If not provided, uses the configured start position
        #[arg(short, long)]
        fen: Option<String>,
    },

    /// Play a sequence of moves and print one JSON record per move
    ///
    /// Moves use coordinate notation; castling may also be written O-O / O-O-O.
    /// Stops at the first illegal move.
    ///
    /// Examples:
    ///   chess-rules play e2e4 e7e5 g1f3
    ///   chess-rules play e7e8q --fen "8/4P3/8/8/8/8/k7/4K3 w - - 0 1"
    Play {
        /// Moves to play in order (e.g., e2e4 e7e5 O-O)
        #[arg(required = true)]
        moves: Vec<String>,
        /// Position to start from. If not provided, uses the configured start position
        #[arg(short, long)]
        fen: Option<String>,
        /// Draw the board after the last move
        #[arg(short, long)]
        board: bool,
    },

    /// Show whether the side to move is in check, checkmated or stalemated
    Status {
        /// Position to classify. If not provided, uses the configured start position
        #[arg(short, long)]
        fen: Option<String>,
    },

    /// Count leaf nodes of the legal move tree
    ///
    /// Examples:
    ///   chess-rules perft 3
    ///   chess-rules perft 2 --divide
    Perft {
        /// Depth in plies
        depth: u32,
        /// Position to search. If not provided, uses the configured start position
        #[arg(short, long)]
        fen: Option<String>,
        /// Break the count down by first move
        #[arg(short, long)]
        divide: bool,
    },
}
