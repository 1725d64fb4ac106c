use super::*;
use chess_rules::{Position, legal_moves};

#[test]
fn test_captures_outrank_quiet_moves() {
    // White can take the d5 queen with the c3 knight
    let pos = Position::from_fen("4k3/8/8/3q4/8/2N5/8/4K3 w - - 0 1").unwrap();
    let moves = legal_moves(&pos);

    let queen_capture = moves
        .iter()
        .find(|m| m.capture == Some(PieceKind::Queen))
        .copied()
        .expect("Nxd5 should be legal");
    let quiet = moves.iter().find(|m| m.capture.is_none()).copied().unwrap();

    assert!(score_move(queen_capture, &pos) > score_move(quiet, &pos));
}

#[test]
fn test_victim_value_ordering() {
    // Knight forks queen and pawn; the queen capture must score higher
    let pos = Position::from_fen("4k3/8/1q1p4/8/2N5/8/8/4K3 w - - 0 1").unwrap();
    let moves = legal_moves(&pos);
    let take_queen = moves
        .iter()
        .find(|m| m.capture == Some(PieceKind::Queen))
        .unwrap();
    let take_pawn = moves
        .iter()
        .find(|m| m.capture == Some(PieceKind::Pawn))
        .unwrap();
    assert!(score_move(*take_queen, &pos) > score_move(*take_pawn, &pos));
}

#[test]
fn test_promotion_bonus() {
    let pos = Position::from_fen("8/P7/8/8/8/8/7k/4K3 w - - 0 1").unwrap();
    let moves = legal_moves(&pos);
    let promo = moves.iter().find(|m| m.promo.is_some()).unwrap();
    let king_move = moves.iter().find(|m| m.promo.is_none()).unwrap();
    assert!(score_move(*promo, &pos) > score_move(*king_move, &pos));
}

#[test]
fn test_scoring_is_stable() {
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    let moves = legal_moves(&pos);
    let first: Vec<f32> = moves.iter().map(|&m| score_move(m, &pos)).collect();
    let second: Vec<f32> = moves.iter().map(|&m| score_move(m, &pos)).collect();
    assert_eq!(first, second);
}

#[test]
fn test_killer_table_fifo() {
    let mut killers = KillerTable::new(4);
    let a = Move::new(0, 1);
    let b = Move::new(2, 3);
    let c = Move::new(4, 5);

    killers.insert(1, a);
    killers.insert(1, a); // duplicate ignored
    assert_eq!(killers.at(1), &[a]);

    killers.insert(1, b);
    assert_eq!(killers.at(1), &[a, b]);

    // Slot full: the oldest entry is replaced
    killers.insert(1, c);
    assert_eq!(killers.at(1), &[c, b]);

    // Other plies untouched
    assert!(killers.at(0).is_empty());
    // Out-of-range ply is a no-op
    killers.insert(10, a);
    assert!(killers.at(10).is_empty());
}

#[test]
fn test_killer_table_reset() {
    let mut killers = KillerTable::new(2);
    killers.insert(0, Move::new(8, 16));
    killers.reset(3);
    assert!(killers.at(0).is_empty());
    assert!(killers.at(2).is_empty());
}

#[test]
fn test_history_bump_and_clear() {
    let mut history = HistoryTable::new();
    assert_eq!(history.get(12, 28), 0.0);
    history.bump(12, 28);
    history.bump(12, 28);
    assert_eq!(history.get(12, 28), 2.0);

    history.clear();
    assert_eq!(history.get(12, 28), 0.0);
}

#[test]
fn test_history_scaling_preserves_order() {
    let mut history = HistoryTable::new();
    // Drive one cell past the scale limit by hand
    for _ in 0..3 {
        history.bump(0, 1);
    }
    history.bump(2, 3);
    // Simulate a hot cell crossing the limit
    for _ in 0..5 {
        history.bump(0, 1);
    }
    assert!(history.get(0, 1) > history.get(2, 3));
}
