//! Tests for draw and terminal detection:
//! - stalemate and checkmate classification
//! - fifty-move rule
//! - threefold repetition
//! - insufficient material

use chess_rules::{Color, DrawKind, Position, Terminal, legal_moves, move_from_san};

// =============================================================================
// Stalemate / checkmate
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    // Black king on a8, White queen on b6, White king on c7
    let pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();

    assert!(legal_moves(&pos).is_empty(), "stalemate has no legal moves");
    assert!(!pos.in_check(Color::Black));
    assert_eq!(pos.terminal(), Some(Terminal::BlackStalemated));
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    // White king g6, white pawn g7, black king g8
    let pos = Position::from_fen("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(pos.terminal(), Some(Terminal::BlackStalemated));
}

#[test]
fn test_checkmate_is_not_stalemate() {
    // Scholar's mate final position
    let pos =
        Position::from_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4")
            .unwrap();
    assert!(legal_moves(&pos).is_empty());
    assert!(pos.in_check(Color::Black));
    assert_eq!(pos.terminal(), Some(Terminal::BlackMated));
}

#[test]
fn test_check_is_not_terminal() {
    let pos =
        Position::from_fen("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2")
            .unwrap();
    assert!(pos.in_check(Color::Black));
    assert_eq!(pos.terminal(), None);
}

// =============================================================================
// Fifty-move rule
// =============================================================================

#[test]
fn test_fifty_move_rule_at_100_halfmoves() {
    let pos = Position::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 100 60").unwrap();
    assert!(pos.is_fifty_move_draw());
    assert_eq!(pos.is_draw(), Some(DrawKind::FiftyMove));
}

#[test]
fn test_fifty_move_rule_at_99_halfmoves() {
    let pos = Position::from_fen("8/1r6/8/4k3/8/4K3/8/8 w - - 99 60").unwrap();
    assert!(!pos.is_fifty_move_draw());
    assert_eq!(pos.is_draw(), None);
}

#[test]
fn test_fifty_move_rule_reset_on_pawn_move() {
    let mut pos = Position::from_fen("8/1r6/8/4k3/8/3K4/4P3/8 w - - 99 60").unwrap();
    let mv = move_from_san(&pos, "e3").unwrap();
    pos.make_move(mv);
    assert_eq!(pos.halfmove_clock, 0);
    assert!(!pos.is_fifty_move_draw());
}

// =============================================================================
// Threefold repetition
// =============================================================================

#[test]
fn test_threefold_repetition_by_knight_shuffle() {
    let mut pos = Position::startpos();

    // Ng1-f3 Ng8-f6, Nf3-g1 Nf6-g8 twice brings the start position up to
    // three occurrences.
    let shuffle = ["Nf3", "Nf6", "Ng1", "Ng8", "Nf3", "Nf6", "Ng1", "Ng8"];
    for (i, san) in shuffle.iter().enumerate() {
        assert_eq!(pos.is_draw(), None, "premature draw before move {i}");
        let mv = move_from_san(&pos, san).unwrap();
        pos.make_move(mv);
    }

    assert!(pos.is_repetition_draw());
    assert_eq!(pos.is_draw(), Some(DrawKind::Repetition));
}

#[test]
fn test_repetition_resets_through_pawn_moves() {
    let mut pos = Position::startpos();
    for san in ["e4", "e5", "Nf3", "Nf6", "Ng1", "Ng8"] {
        let mv = move_from_san(&pos, san).unwrap();
        pos.make_move(mv);
    }
    // Position after 1.e4 e5 has now occurred twice, not three times.
    assert!(!pos.is_repetition_draw());
}

// =============================================================================
// Insufficient material
// =============================================================================

#[test]
fn test_insufficient_material_king_vs_king() {
    let pos = Position::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 0 1").unwrap();
    assert!(pos.is_insufficient_material());
    assert_eq!(pos.is_draw(), Some(DrawKind::InsufficientMaterial));
}

#[test]
fn test_insufficient_material_lone_minor() {
    for fen in [
        "8/8/8/4k3/8/4KB2/8/8 w - - 0 1",
        "8/8/8/4k3/8/4KN2/8/8 w - - 0 1",
        "8/8/4b3/4k3/8/4K3/8/8 w - - 0 1",
        "8/8/4n3/4k3/8/4K3/8/8 w - - 0 1",
    ] {
        let pos = Position::from_fen(fen).unwrap();
        assert!(pos.is_insufficient_material(), "{fen} should be drawn");
    }
}

#[test]
fn test_insufficient_material_same_color_bishops() {
    // Bishops on c1 and f8: both dark squares
    let pos = Position::from_fen("5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1").unwrap();
    assert!(pos.is_insufficient_material());
}

#[test]
fn test_sufficient_material_opposite_color_bishops() {
    // c1 is dark, c8 is light
    let pos = Position::from_fen("2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1").unwrap();
    assert!(!pos.is_insufficient_material());
}

#[test]
fn test_sufficient_material_cases() {
    for fen in [
        "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4R3 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4Q3 w - - 0 1",
        "8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1",
    ] {
        let pos = Position::from_fen(fen).unwrap();
        assert!(!pos.is_insufficient_material(), "{fen} is not drawn");
    }
}
