use crate::chess::{Position, STARTING_FEN};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Rule options for an [`Engine`](crate::chess::Engine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Position new games start from
    pub start_fen: String,
    /// Reject a pawn move onto the last rank that names no promotion piece
    /// instead of promoting to a queen
    pub require_promotion_choice: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            start_fen: STARTING_FEN.to_string(),
            require_promotion_choice: false,
        }
    }
}

impl RulesConfig {
    /// Get the default config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        ProjectDirs::from("dev", "chess-rules", "chess-rules")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Get the default config file path
    pub fn default_config_file() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("rules.toml"))
    }

    /// Parse and validate a TOML document; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).context("Failed to parse rules configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load from the per-user config file, falling back to defaults when absent
    pub fn load_or_default() -> Result<Self> {
        let config_file = Self::default_config_file()?;
        if config_file.exists() {
            Self::load(&config_file)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, content).context("Failed to write configuration file")?;
        Ok(())
    }

    /// Check that the start position parses
    pub fn validate(&self) -> Result<()> {
        Position::from_fen(&self.start_fen)
            .with_context(|| format!("Invalid start_fen '{}'", self.start_fen))?;
        Ok(())
    }
}
