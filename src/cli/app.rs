use crate::chess::{all_legal_moves, apply, perft, Engine, Position, Square};
use crate::cli::commands::Commands;
use crate::cli::display::{render_board, supports_unicode};
use crate::config::RulesConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Command driver around an [`Engine`]
///
/// Every command returns the text to print so the binary stays a thin shell.
pub struct App {
    engine: Engine,
    unicode: bool,
}

impl App {
    pub fn new(config: RulesConfig) -> Self {
        Self {
            engine: Engine::new(config),
            unicode: supports_unicode(),
        }
    }

    /// Load configuration from `path`, or from the per-user config file
    pub fn from_config_path(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => RulesConfig::load(path)?,
            None => RulesConfig::load_or_default().context("Failed to initialize configuration")?,
        };
        debug!(start_fen = %config.start_fen, "configuration loaded");
        Ok(Self::new(config))
    }

    /// Draw boards with ASCII letters instead of chess glyphs
    pub fn with_ascii_board(mut self) -> Self {
        self.unicode = false;
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn run(&self, command: &Commands) -> Result<String> {
        match command {
            Commands::Fen { fen, board } => self.fen(fen.as_deref(), *board),
            Commands::Moves { square, fen } => self.moves(fen.as_deref(), square.as_deref()),
            Commands::Play { moves, fen, board } => self.play(fen.as_deref(), moves, *board),
            Commands::Status { fen } => self.status(fen.as_deref()),
            Commands::Perft { depth, fen, divide } => self.perft(fen.as_deref(), *depth, *divide),
        }
    }

    fn position(&self, fen: Option<&str>) -> Result<Position> {
        self.engine
            .new_game(fen)
            .with_context(|| format!("Failed to load position '{}'", fen.unwrap_or("start")))
    }

    pub fn fen(&self, fen: Option<&str>, board: bool) -> Result<String> {
        let position = self.position(fen)?;
        let mut out = position.to_fen();
        out.push('\n');
        if board {
            out.push_str(&render_board(&position, position.side_to_move(), self.unicode));
        }
        Ok(out)
    }

    pub fn moves(&self, fen: Option<&str>, square: Option<&str>) -> Result<String> {
        let position = self.position(fen)?;

        let moves: Vec<String> = match square {
            Some(square) => {
                let square: Square = square
                    .parse()
                    .with_context(|| format!("Invalid square '{}'", square))?;
                self.engine
                    .legal_moves(&position, square)
                    .into_iter()
                    .map(|to| to.to_string())
                    .collect()
            }
            None => all_legal_moves(&position)
                .into_iter()
                .map(|mv| mv.to_string())
                .collect(),
        };

        Ok(format!("{}\n", moves.join(" ")))
    }

    /// Play `moves` in order, one JSON record per line
    pub fn play(&self, fen: Option<&str>, moves: &[String], board: bool) -> Result<String> {
        let mut position = self.position(fen)?;
        let mut out = String::new();

        for (ply, text) in moves.iter().enumerate() {
            let record = self
                .engine
                .play_uci(&position, text)
                .with_context(|| format!("Move {} ('{}') rejected", ply + 1, text))?;
            info!(uci = %record.uci, san = %record.san, "move played");

            position = Position::from_fen(&record.fen)
                .with_context(|| format!("Engine produced invalid FEN '{}'", record.fen))?;
            out.push_str(&serde_json::to_string(&record).context("Failed to serialize move")?);
            out.push('\n');
        }

        if board {
            out.push_str(&render_board(&position, position.side_to_move(), self.unicode));
        }
        Ok(out)
    }

    pub fn status(&self, fen: Option<&str>) -> Result<String> {
        let position = self.position(fen)?;
        let status = self.engine.status(&position);
        let json = serde_json::to_string(&status).context("Failed to serialize status")?;
        Ok(format!("{}\n{}\n", status, json))
    }

    pub fn perft(&self, fen: Option<&str>, depth: u32, divide: bool) -> Result<String> {
        let position = self.position(fen)?;
        let mut out = String::new();

        if divide && depth > 0 {
            let mut total = 0;
            for mv in all_legal_moves(&position) {
                let next = apply(&position, mv)?;
                let count = perft(&next, depth - 1);
                total += count;
                out.push_str(&format!("{}: {}\n", mv, count));
            }
            out.push_str(&format!("\nNodes searched: {}\n", total));
        } else {
            out.push_str(&format!("{}\n", perft(&position, depth)));
        }

        Ok(out)
    }
}
