pub mod chess;
pub mod cli;
pub mod config;

// Re-export key types for easy testing
pub use chess::{ChessError, Engine, GameStatus, Move, MoveRecord, Position, Square};
pub use config::RulesConfig;
