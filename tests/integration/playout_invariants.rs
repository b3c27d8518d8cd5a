use crate::common::fixtures::*;
use crate::common::test_helpers::position;
use chess_rules::chess::{
    all_legal_moves, is_in_check, legal_destinations, status, try_move, CastleSide, Color, Move,
    PieceType, Position, Square,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const MAX_PLIES: usize = 120;

/// Check every invariant that must hold after `mv` took `before` to `after`
fn check_transition(before: &Position, mv: Move, after: &Position) {
    let fen = after.to_fen();

    // serialization is lossless
    assert_eq!(&Position::from_fen(&fen).unwrap(), after, "round trip failed for {}", fen);

    // both kings are still on the board and the mover is not left in check
    let mover = before.side_to_move();
    assert!(after.king_square(Color::White).is_some(), "white king gone in {}", fen);
    assert!(after.king_square(Color::Black).is_some(), "black king gone in {}", fen);
    assert!(!is_in_check(after, mover), "{} left {} in check", mv, mover);
    assert_eq!(after.side_to_move(), mover.opposite());

    // castling rights only ever shrink
    for color in [Color::White, Color::Black] {
        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            if after.castling_rights().has(color, side) {
                assert!(before.castling_rights().has(color, side), "right regained in {}", fen);
            }
        }
    }

    // an en passant target exists only right behind a double push
    let moved = before.piece_at(mv.from).unwrap();
    let double_push = moved.piece_type == PieceType::Pawn && mv.rank_delta().abs() == 2;
    match after.en_passant_target() {
        Some(target) => {
            assert!(double_push, "stale en passant target after {} in {}", mv, fen);
            assert_eq!(target.file, mv.from.file);
            assert_eq!(target.rank, (mv.from.rank + mv.to.rank) / 2);
        }
        None => assert!(!double_push, "missing en passant target after {}", mv),
    }

    // halfmove clock resets exactly on pawn moves and captures
    let captured = before.piece_at(mv.to).is_some()
        || (moved.piece_type == PieceType::Pawn && mv.from.file != mv.to.file);
    if moved.piece_type == PieceType::Pawn || captured {
        assert_eq!(after.halfmove_clock(), 0);
    } else {
        assert_eq!(after.halfmove_clock(), before.halfmove_clock() + 1);
    }
}

/// No legal destination set ever includes a square holding a king
fn check_no_king_targets(current: &Position) {
    let kings: Vec<Square> = [Color::White, Color::Black]
        .into_iter()
        .filter_map(|color| current.king_square(color))
        .collect();

    for (from, _) in current.pieces() {
        let destinations = legal_destinations(current, from);
        for king in &kings {
            assert!(!destinations.contains(king), "{} can reach king on {}", from, king);
        }
    }
}

fn random_playout(start: &str, seed: u64) -> usize {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut current = position(start);

    for ply in 0..MAX_PLIES {
        check_no_king_targets(&current);

        let moves = all_legal_moves(&current);
        let game_status = status(&current);
        assert_eq!(moves.is_empty(), game_status.is_terminal(), "status disagrees in {}", current);

        let Some(&mv) = moves.choose(&mut rng) else {
            return ply;
        };

        let snapshot = current.clone();
        let (next, _) = try_move(&current, mv).unwrap();
        assert_eq!(current, snapshot, "try_move mutated its input");

        check_transition(&current, mv, &next);
        current = next;
    }

    MAX_PLIES
}

/// Random Playout Invariant Tests
/// Seeded random games from several starting points, checking engine
/// invariants after every ply
#[cfg(test)]
mod playout_invariant_tests {
    use super::*;

    /// Test invariants along random games from the standard start
    #[test]
    fn test_random_games_from_start() {
        for seed in 0..6 {
            let plies = random_playout(START, seed);
            assert!(plies > 0);
        }
    }

    /// Test invariants from positions rich in castling, promotion and en passant
    #[test]
    fn test_random_games_from_tactical_positions() {
        for (index, fen) in [KIWIPETE, ROOK_ENDGAME, PROMOTION_TANGLE, MIDGAME_PROMOTION]
            .into_iter()
            .enumerate()
        {
            for seed in 0..3 {
                random_playout(fen, 1000 * index as u64 + seed);
            }
        }
    }

    /// Test that the same seed replays the same game
    #[test]
    fn test_playouts_are_reproducible() {
        assert_eq!(random_playout(START, 42), random_playout(START, 42));
    }
}
