use crate::common::fixtures::*;
use chess_rules::cli::{App, Cli, Commands};
use chess_rules::RulesConfig;
use clap::Parser;
use tempfile::TempDir;

fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    App::new(RulesConfig::default())
        .with_ascii_board()
        .run(&cli.command)
}

/// CLI Command Tests
/// Argument parsing and command output of the driver
#[cfg(test)]
mod cli_command_tests {
    use super::*;

    /// Test argument parsing for each subcommand
    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["chess-rules", "perft", "3", "--divide"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Perft {
                depth: 3,
                divide: true,
                fen: None
            }
        ));

        let cli = Cli::try_parse_from(["chess-rules", "--config", "x.toml", "moves", "e2"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("x.toml")));

        assert!(Cli::try_parse_from(["chess-rules", "play"]).is_err());
        assert!(Cli::try_parse_from(["chess-rules", "perft", "deep"]).is_err());
    }

    /// Test the command outputs end to end
    #[test]
    fn test_command_outputs() {
        assert_eq!(run(&["chess-rules", "fen"]).unwrap(), format!("{}\n", START));
        assert_eq!(run(&["chess-rules", "moves", "e2"]).unwrap(), "e3 e4\n");
        assert_eq!(run(&["chess-rules", "perft", "1", "--fen", KIWIPETE]).unwrap(), "48\n");

        let status = run(&["chess-rules", "status", "--fen", FOOLS_MATE]).unwrap();
        assert!(status.starts_with("Checkmate, Black wins"));

        let played = run(&["chess-rules", "play", "e2e4", "e7e5", "--board"]).unwrap();
        assert_eq!(played.lines().filter(|line| line.starts_with('{')).count(), 2);
        assert!(played.contains("4 │ │ │ │ │P│ │ │ │ 4"));
    }

    /// Test that bad input surfaces as an error instead of output
    #[test]
    fn test_command_errors() {
        assert!(run(&["chess-rules", "fen", "not a fen"]).is_err());
        assert!(run(&["chess-rules", "play", "e2e5"]).is_err());
        assert!(run(&["chess-rules", "moves", "i9"]).is_err());
    }

    /// Test loading the driver configuration from an explicit path
    #[test]
    fn test_app_from_config_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rules.toml");
        RulesConfig {
            start_fen: ROOK_ENDGAME.to_string(),
            require_promotion_choice: false,
        }
        .save(&path)
        .unwrap();

        let app = App::from_config_path(Some(path.as_path())).unwrap();
        assert_eq!(app.perft(None, 2, false).unwrap(), "191\n");

        let missing = temp_dir.path().join("absent.toml");
        assert!(App::from_config_path(Some(missing.as_path())).is_err());
    }
}
