use crate::common::fixtures::*;
use crate::common::test_helpers::{mv, play_line, position, sq};
use chess_rules::chess::{
    is_attacked, is_in_check, is_legal, legal_destinations, status, try_move, CastleSide,
    ChessError, Color, GameStatus, Piece, PieceType, Position, Square,
};

/// Rules Integration Tests
/// Special moves, check handling and game endings played through the
/// public session functions
#[cfg(test)]
mod rules_integration_tests {
    use super::*;

    /// Test en passant right after the double push, and its expiry
    #[test]
    fn test_en_passant_capture_and_expiry() {
        let before = play_line(START, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        assert_eq!(before.en_passant_target(), Some(sq("d6")));
        assert!(legal_destinations(&before, sq("e5")).contains(&sq("d6")));

        let (after, _) = try_move(&before, mv("e5d6")).unwrap();
        assert_eq!(after.piece_at(sq("d5")), None);
        assert_eq!(
            after.piece_at(sq("d6")),
            Some(Piece::new(PieceType::Pawn, Color::White))
        );
        assert_eq!(after.en_passant_target(), None);

        // one waiting move on each side and the chance is gone
        let later = play_line(START, &["e2e4", "a7a6", "e4e5", "d7d5", "g1f3", "a6a5"]);
        assert_eq!(later.en_passant_target(), None);
        assert!(!is_legal(&later, mv("e5d6")));
    }

    /// Test that en passant is refused when it would expose the king on the rank
    #[test]
    fn test_en_passant_discovered_check_refused() {
        let pinned = position("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
        assert!(!is_legal(&pinned, mv("e5d6")));
        assert!(is_legal(&pinned, mv("e5e6")));
    }

    /// Test castling on both wings for both colors
    #[test]
    fn test_castling_both_wings() {
        let white_short = play_line(CASTLING_READY, &["e1g1"]);
        assert_eq!(white_short.piece_at(sq("f1")).map(|p| p.piece_type), Some(PieceType::Rook));
        assert_eq!(white_short.piece_at(sq("g1")).map(|p| p.piece_type), Some(PieceType::King));
        assert_eq!(white_short.piece_at(sq("h1")), None);

        let opposite_wings = play_line(CASTLING_READY, &["e1c1", "e8g8"]);
        assert_eq!(opposite_wings.to_fen(), "r4rk1/8/8/8/8/8/8/2KR3R w - - 2 2");

        // the rook now on d1 covers d8, so black may not castle long
        let after_white = play_line(CASTLING_READY, &["e1c1"]);
        assert!(!is_legal(&after_white, mv("e8c8")));
    }

    /// Test each castling precondition in isolation
    #[test]
    fn test_castling_preconditions() {
        // king in check
        let checked = position("r3k2r/8/8/8/8/8/4q3/R3K2R w KQkq - 0 1");
        assert!(!is_legal(&checked, mv("e1g1")));

        // crossing an attacked square
        let crossing = position("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1");
        assert!(!is_legal(&crossing, mv("e1g1")));
        assert!(is_legal(&crossing, mv("e1c1")));

        // landing on an attacked square
        let landing = position("r3k2r/8/8/8/8/8/6r1/R3K2R w KQkq - 0 1");
        assert!(!is_legal(&landing, mv("e1g1")));

        // b1 attacked only matters to the rook, not the king
        let b_file = position("r3k2r/8/8/8/8/8/1r6/R3K2R w KQkq - 0 1");
        assert!(is_legal(&b_file, mv("e1c1")));

        // piece in the way
        let blocked = position("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1");
        assert!(!is_legal(&blocked, mv("e1c1")));

        // right already lost
        let no_right = position("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1");
        assert!(!is_legal(&no_right, mv("e1g1")));
    }

    /// Test that castling rights are revoked by king moves, rook moves and rook captures
    #[test]
    fn test_castling_rights_revocation() {
        let king_moved = play_line(CASTLING_READY, &["e1e2", "e8d8"]);
        assert_eq!(king_moved.castling_rights().to_fen(), "-");

        let rook_captured = play_line(CASTLING_READY, &["a1a8"]);
        let rights = rook_captured.castling_rights();
        assert!(!rights.has(Color::White, CastleSide::Queenside));
        assert!(!rights.has(Color::Black, CastleSide::Queenside));
        assert!(rights.has(Color::White, CastleSide::Kingside));
        assert!(rights.has(Color::Black, CastleSide::Kingside));

        // the king going back home does not restore anything
        let returned = play_line(CASTLING_READY, &["e1f1", "e8f8", "f1e1", "f8e8"]);
        assert!(!is_legal(&returned, mv("e1g1")));
    }

    /// Test Fool's mate, both as a fixture and as a played game
    #[test]
    fn test_fools_mate() {
        let expected = GameStatus::Checkmate {
            winner: Color::Black,
        };
        assert_eq!(status(&position(FOOLS_MATE)), expected);

        let before_mate = play_line(START, &["f2f3", "e7e5", "g2g4"]);
        let (after, result) = try_move(&before_mate, mv("d8h4")).unwrap();
        assert_eq!(result, expected);
        assert_eq!(
            after.to_fen(),
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
        );
    }

    /// Test a stalemate with the lone king boxed in
    #[test]
    fn test_stalemate() {
        let stalemate = position(QUEEN_STALEMATE);
        assert_eq!(status(&stalemate), GameStatus::Stalemate);
        assert!(!is_in_check(&stalemate, Color::Black));
        assert!(legal_destinations(&stalemate, sq("h8")).is_empty());
    }

    /// Test that no move may capture a king, even from a position with the king en prise
    #[test]
    fn test_king_is_never_captured() {
        let exposed = position("4k3/8/8/8/8/8/8/4RK2 w - - 0 1");
        assert!(is_attacked(&exposed, sq("e8"), Color::White));

        let result = try_move(&exposed, mv("e1e8"));
        assert!(matches!(result, Err(ChessError::IllegalMove(_))));

        for square in Square::all() {
            assert!(!legal_destinations(&exposed, square).contains(&sq("e8")));
            assert!(!legal_destinations(&exposed, square).contains(&sq("f1")));
        }
    }

    /// Test that a rejected move leaves the caller's position untouched
    #[test]
    fn test_rejection_does_not_mutate() {
        let original = position(KIWIPETE);
        let snapshot = original.to_fen();

        for text in ["e1e3", "a2a5", "e5e4", "d5e6q", "a7a6"] {
            assert!(try_move(&original, mv(text)).is_err(), "{} should fail", text);
        }
        assert_eq!(original.to_fen(), snapshot);
    }

    /// Test that mutating a clone never changes the original
    #[test]
    fn test_clone_independence() {
        let original = Position::starting();
        let copy = original.clone();

        let (moved_copy, _) = try_move(&copy, mv("e2e4")).unwrap();
        assert_ne!(moved_copy, original);
        assert_eq!(original.to_fen(), START);
        assert_eq!(copy.to_fen(), START);
    }

    /// Test that only check-resolving moves are legal while in check
    #[test]
    fn test_only_evasions_while_in_check() {
        // queen on h4 checks e1 along the diagonal; g3 blocks, f2 steps aside
        let checked = play_line(START, &["f2f3", "e7e5", "e2e4", "d8h4"]);
        assert!(is_in_check(&checked, Color::White));

        assert!(is_legal(&checked, mv("g2g3")));
        assert!(is_legal(&checked, mv("e1e2")));
        assert!(!is_legal(&checked, mv("a2a3")));
        assert!(!is_legal(&checked, mv("g1h3")));
    }

    /// Test promotion through the session API, including underpromotion
    #[test]
    fn test_promotion_choices() {
        let base = "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1";
        for (text, piece) in [
            ("b7b8q", PieceType::Queen),
            ("b7b8r", PieceType::Rook),
            ("b7b8b", PieceType::Bishop),
            ("b7b8n", PieceType::Knight),
            ("b7b8", PieceType::Queen),
        ] {
            let after = play_line(base, &[text]);
            assert_eq!(
                after.piece_at(sq("b8")),
                Some(Piece::new(piece, Color::White)),
                "{} promoted to the wrong piece",
                text
            );
        }
    }
}
