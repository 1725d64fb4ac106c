//! End-to-end solve scenarios driving the public API only.

use std::time::{Duration, Instant};

use chess_rules::{Position, legal_moves, move_from_san};
use chess_search::{Engine, INF, SearchConfig, SearchReport};

#[test]
fn test_starting_position_gives_a_sane_opening_move() {
    let mut pos = Position::startpos();
    let mut engine = Engine::with_config(SearchConfig::depth(4));

    let mut reports: Vec<SearchReport> = Vec::new();
    let mv = engine
        .solve_with(&mut pos, true, |r| reports.push(r.clone()))
        .expect("the starting position has moves");

    assert!(legal_moves(&pos).contains(&mv), "solve returned an illegal move");
    assert_eq!(reports.len(), 4, "every depth should complete untimed");
    let depth_one_score = reports[0].score;
    assert!(
        depth_one_score.abs() <= 50,
        "start position at depth 1 should be near equal, got {depth_one_score}"
    );
    // Deeper scores drift with the mobility term but stay sane
    assert!(reports.last().unwrap().score.abs() < 200);
    // Depths must arrive in order with nodes counted
    for (i, r) in reports.iter().enumerate() {
        assert_eq!(r.depth as usize, i + 1);
        assert!(r.nodes > 0);
    }
}

#[test]
fn test_back_rank_mate_in_one() {
    let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
    let mut engine = Engine::with_config(SearchConfig::depth(3));

    let mut last = None;
    let mv = engine
        .solve_with(&mut pos, true, |r| last = Some(r.clone()))
        .unwrap();

    let mate = move_from_san(&pos, "Ra8#").unwrap();
    assert_eq!(mv, mate);
    assert_eq!(last.unwrap().score, INF - 1);
}

#[test]
fn test_forced_capture_of_hanging_queen() {
    // Black's queen hangs on d5 in front of the c3 knight; depth 2 is
    // enough to bank the material.
    let mut pos =
        Position::from_fen("rnb1kbnr/ppp1pppp/8/3q4/8/2N5/PPPP1PPP/R1BQKBNR w KQkq - 4 4")
            .unwrap();
    let mut engine = Engine::with_config(SearchConfig::depth(2));

    let mut last_score = 0;
    let mv = engine
        .solve_with(&mut pos, true, |r| last_score = r.score)
        .unwrap();

    assert_eq!(mv.capture, Some(chess_rules::PieceKind::Queen));
    assert!(last_score > 500, "material gain missing from score: {last_score}");
}

#[test]
fn test_stalemate_at_the_root() {
    // Black to move, no legal moves, not in check
    let mut pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    let mut engine = Engine::with_config(SearchConfig::depth(4));
    assert_eq!(engine.solve(&mut pos, false), None);
}

#[test]
fn test_search_is_reproducible_across_fresh_engines() {
    let fen = "r1bqkbnr/1ppp1ppp/p1n5/4p3/B3P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 4";

    let run = || {
        let mut pos = Position::from_fen(fen).unwrap();
        let mut engine = Engine::with_config(SearchConfig::depth(4));
        let mut scores = Vec::new();
        let mv = engine.solve_with(&mut pos, true, |r| scores.push(r.score));
        (mv, scores)
    };

    let (mv1, scores1) = run();
    let (mv2, scores2) = run();
    assert_eq!(mv1, mv2);
    assert_eq!(scores1, scores2, "same search must give bit-identical scores");
}

#[test]
fn test_time_budget_is_respected() {
    // Deep cap, tight clock: solve must come back with a legal move from
    // some completed iteration, within the budget plus slack.
    let mut pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    let mut engine = Engine::with_config(SearchConfig {
        max_depth: 50,
        time_limit: Some(Duration::from_secs(1)),
        tt_entries: 1 << 16,
    });

    let started = Instant::now();
    let mv = engine.solve(&mut pos, true);
    let took = started.elapsed();

    assert!(mv.is_some(), "at least depth 1 should complete in a second");
    assert!(legal_moves(&pos).contains(&mv.unwrap()));
    assert!(
        took < Duration::from_millis(2500),
        "time budget overshot: {took:?}"
    );
}

#[test]
fn test_solve_leaves_position_unchanged() {
    let mut pos = Position::startpos();
    let key_before = pos.zobrist_key();
    let mut engine = Engine::with_config(SearchConfig::depth(3));
    engine.solve(&mut pos, true).unwrap();
    assert_eq!(pos.zobrist_key(), key_before);
    assert_eq!(pos.fullmove_number, 1);
}

#[test]
fn test_draw_scores_zero_at_shallow_depth() {
    // Dead-drawn position: bare kings. Any reported score must be 0.
    let mut pos = Position::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 0 1").unwrap();
    let mut engine = Engine::with_config(SearchConfig::depth(3));
    let mut scores = Vec::new();
    engine.solve_with(&mut pos, true, |r| scores.push(r.score));
    assert!(scores.iter().all(|&s| s == 0), "drawn position must score 0");
}
