//! Move ordering: the per-move priority function plus the killer-move and
//! history tables the search feeds on beta cutoffs.

use chess_rules::{Move, PieceKind, Position};

use crate::eval::pst_bonus;

/// Ordering priority for a legal move. Higher is tried earlier.
///
/// Sum of a most-valuable-victim capture bonus, a flat promotion bonus and
/// the piece-square gain of the relocation (scaled down so captures
/// dominate). This is an ordering heuristic, not a search result.
pub fn score_move(mv: Move, pos: &Position) -> f32 {
    let mut score = 0.0f32;

    if let Some(victim) = mv.capture {
        score += match victim {
            PieceKind::Pawn => 1.0,
            PieceKind::Knight | PieceKind::Bishop => 3.0,
            PieceKind::Rook => 5.0,
            PieceKind::Queen => 9.0,
            // Kings are never actually captured; keep the ordering sane anyway.
            PieceKind::King => 1000.0,
        };
    }

    if mv.promo.is_some() {
        score += 9.0;
    }

    if let Some(pc) = pos.piece_at(mv.from) {
        let gain = pst_bonus(pc.kind, mv.to, pc.color) - pst_bonus(pc.kind, mv.from, pc.color);
        score += gain as f32 / 100.0;
    }

    score
}

/// Cutoff moves remembered per ply, at most two, FIFO-replaced.
///
/// A killer is a move that refuted a sibling subtree at the same ply; it
/// is tried early in the remaining siblings.
#[derive(Debug, Clone)]
pub struct KillerTable {
    slots: Vec<Vec<Move>>,
}

impl KillerTable {
    const MAX_PER_PLY: usize = 2;

    pub fn new(max_ply: usize) -> Self {
        KillerTable {
            slots: vec![Vec::new(); max_ply],
        }
    }

    /// Drop all killers and resize for a new search.
    pub fn reset(&mut self, max_ply: usize) {
        self.slots.clear();
        self.slots.resize(max_ply, Vec::new());
    }

    pub fn at(&self, ply: usize) -> &[Move] {
        self.slots.get(ply).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert(&mut self, ply: usize, mv: Move) {
        let Some(slot) = self.slots.get_mut(ply) else {
            return;
        };
        if slot.contains(&mv) {
            return;
        }
        if slot.len() < Self::MAX_PER_PLY {
            slot.push(mv);
        } else {
            // Replace the oldest killer
            slot[0] = mv;
        }
    }
}

/// Per-(from, to) cutoff counter used as an ordering tiebreaker.
///
/// Grows monotonically within one search; the whole table is halved once
/// any entry crosses `SCALE_LIMIT` so the `f32`s keep their precision.
#[derive(Debug, Clone)]
pub struct HistoryTable {
    scores: Box<[[f32; 64]; 64]>,
}

impl HistoryTable {
    const SCALE_LIMIT: f32 = 1e6;

    pub fn new() -> Self {
        HistoryTable {
            scores: Box::new([[0.0; 64]; 64]),
        }
    }

    pub fn clear(&mut self) {
        for row in self.scores.iter_mut() {
            row.fill(0.0);
        }
    }

    #[inline]
    pub fn get(&self, from: u8, to: u8) -> f32 {
        self.scores[from as usize][to as usize]
    }

    pub fn bump(&mut self, from: u8, to: u8) {
        let cell = &mut self.scores[from as usize][to as usize];
        *cell += 1.0;
        if *cell > Self::SCALE_LIMIT {
            for row in self.scores.iter_mut() {
                for v in row.iter_mut() {
                    *v /= 2.0;
                }
            }
        }
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
