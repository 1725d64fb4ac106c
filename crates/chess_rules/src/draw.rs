//! Draw and terminal-position detection.

use crate::board::Position;
use crate::movegen::legal_moves;
use crate::types::*;

/// Why a position is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawKind {
    FiftyMove,
    Repetition,
    InsufficientMaterial,
}

impl std::fmt::Display for DrawKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawKind::FiftyMove => write!(f, "50-move rule"),
            DrawKind::Repetition => write!(f, "threefold repetition"),
            DrawKind::InsufficientMaterial => write!(f, "insufficient material"),
        }
    }
}

/// Game-ending states where the side to move has no legal moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminal {
    WhiteMated,
    BlackMated,
    WhiteStalemated,
    BlackStalemated,
}

impl Position {
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// True when the current position has occurred three or more times
    /// since this `Position` was constructed.
    pub fn is_repetition_draw(&self) -> bool {
        let Some(&current) = self.seen.last() else {
            return false;
        };
        self.seen.iter().filter(|&&k| k == current).count() >= 3
    }

    /// Neither side can possibly deliver mate: bare kings, a lone minor
    /// piece, or same-colored bishops only.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors: [Vec<(PieceKind, u8)>; 2] = [Vec::new(), Vec::new()];
        for s in 0..64u8 {
            let Some(pc) = self.piece_at(s) else {
                continue;
            };
            match pc.kind {
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Bishop | PieceKind::Knight => minors[pc.color.idx()].push((pc.kind, s)),
                PieceKind::King => {}
            }
        }

        match (&minors[0][..], &minors[1][..]) {
            ([], []) | ([_], []) | ([], [_]) => true,
            ([(PieceKind::Bishop, w)], [(PieceKind::Bishop, b)]) => {
                // Same-colored bishops can never meet.
                square_shade(*w) == square_shade(*b)
            }
            _ => false,
        }
    }

    pub fn is_draw(&self) -> Option<DrawKind> {
        if self.is_fifty_move_draw() {
            Some(DrawKind::FiftyMove)
        } else if self.is_insufficient_material() {
            Some(DrawKind::InsufficientMaterial)
        } else if self.is_repetition_draw() {
            Some(DrawKind::Repetition)
        } else {
            None
        }
    }

    /// Checkmate / stalemate detection for the side to move.
    pub fn terminal(&self) -> Option<Terminal> {
        if !legal_moves(self).is_empty() {
            return None;
        }
        let mated = self.in_check(self.side_to_move);
        Some(match (self.side_to_move, mated) {
            (Color::White, true) => Terminal::WhiteMated,
            (Color::Black, true) => Terminal::BlackMated,
            (Color::White, false) => Terminal::WhiteStalemated,
            (Color::Black, false) => Terminal::BlackStalemated,
        })
    }
}

/// 0 for dark squares, 1 for light.
fn square_shade(sq: u8) -> u8 {
    ((file_of(sq) + rank_of(sq)) % 2) as u8
}
