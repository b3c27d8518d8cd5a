use crate::common::fixtures::*;
use crate::common::test_helpers::{mv, position, sq};
use chess_rules::chess::{
    legal_moves, new_game, status, try_move, ChessError, Color, Engine, GameStatus, MoveRecord,
    Piece, PieceType, Position,
};
use chess_rules::RulesConfig;
use std::collections::BTreeSet;
use tempfile::TempDir;

/// Session Integration Tests
/// The four session operations, Engine move records, and configuration
/// loaded from disk
#[cfg(test)]
mod session_integration_tests {
    use super::*;

    /// Test a short game driven only through the session functions
    #[test]
    fn test_session_functions_drive_a_game() {
        let mut current = new_game(None).unwrap();
        assert_eq!(
            legal_moves(&current, sq("b1")),
            BTreeSet::from([sq("a3"), sq("c3")])
        );

        for text in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6"] {
            let (next, result) = try_move(&current, mv(text)).unwrap();
            assert_eq!(result, GameStatus::Ongoing { in_check: false });
            current = next;
        }

        let (mated, result) = try_move(&current, mv("h5f7")).unwrap();
        assert_eq!(
            result,
            GameStatus::Checkmate {
                winner: Color::White
            }
        );
        assert_eq!(status(&mated), result);
        assert!(legal_moves(&mated, sq("e8")).is_empty());
    }

    /// Test that every rejection is an IllegalMove carrying a reason
    #[test]
    fn test_rejections_carry_reasons() {
        let start = Position::starting();
        for (text, fragment) in [
            ("e3e4", "No piece"),
            ("e7e5", "turn"),
            ("e2e5", "cannot move"),
            ("e2e4q", "promote"),
        ] {
            match try_move(&start, mv(text)) {
                Err(ChessError::IllegalMove(reason)) => {
                    assert!(reason.contains(fragment), "'{}' lacks '{}'", reason, fragment)
                }
                other => panic!("{} should be illegal, got {:?}", text, other),
            }
        }

        let pinned = position("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1");
        match try_move(&pinned, mv("e2d3")) {
            Err(ChessError::IllegalMove(reason)) => assert!(reason.contains("check")),
            other => panic!("pinned bishop moved: {:?}", other),
        }
    }

    /// Test a full record for a capturing, checking move
    #[test]
    fn test_engine_record_for_capture_with_check() {
        let engine = Engine::default();
        let before = position("4k3/8/8/8/8/8/3r4/3QK3 w - - 0 1");
        let record = engine.play(&before, mv("d1d2")).unwrap();

        assert_eq!(record.san, "Qxd2");
        assert_eq!(record.captured, Some(Piece::new(PieceType::Rook, Color::Black)));
        assert_eq!(record.fen, "4k3/8/8/8/8/8/3Q4/4K3 b - - 0 1");
        assert!(!record.is_check);

        let check = engine
            .play(&position("4k3/8/8/8/8/8/8/R3K3 w - - 0 1"), mv("a1a8"))
            .unwrap();
        assert_eq!(check.san, "Ra8+");
        assert!(check.is_check);
        assert_eq!(check.status, GameStatus::Ongoing { in_check: true });
    }

    /// Test that records survive JSON transport and still match the position
    #[test]
    fn test_record_json_transport() {
        let engine = Engine::default();
        let record = engine.play_uci(&position(KIWIPETE), "O-O").unwrap();
        assert_eq!(record.uci, "e1g1");

        let payload = serde_json::to_string(&record).unwrap();
        let received: MoveRecord = serde_json::from_str(&payload).unwrap();
        assert_eq!(received, record);

        let rebuilt = Position::from_fen(&received.fen).unwrap();
        assert!(rebuilt.verify_state_hash(&received.state_hash));
        assert_eq!(rebuilt.side_to_move(), Color::Black);
    }

    /// Test an engine configured from a TOML file on disk
    #[test]
    fn test_engine_from_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rules.toml");
        std::fs::write(
            &path,
            "start_fen = \"4k3/P7/8/8/8/8/8/4K3 w - - 0 1\"\nrequire_promotion_choice = true\n",
        )
        .unwrap();

        let engine = Engine::new(RulesConfig::load(&path).unwrap());
        let start = engine.new_game(None).unwrap();
        assert_eq!(start.to_fen(), "4k3/P7/8/8/8/8/8/4K3 w - - 0 1");

        assert!(matches!(
            engine.play(&start, mv("a7a8")),
            Err(ChessError::IllegalMove(_))
        ));
        let record = engine.play(&start, mv("a7a8n")).unwrap();
        assert_eq!(record.san, "a8=N");
    }

    /// Test that a config file with a broken start position is refused
    #[test]
    fn test_config_file_with_bad_fen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rules.toml");
        std::fs::write(&path, "start_fen = \"8/8/8 w - - 0 1\"\n").unwrap();

        let err = RulesConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid start_fen"));
    }
}
