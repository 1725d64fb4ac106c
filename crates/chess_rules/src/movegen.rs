//! Legal move generation.
//!
//! Pseudo-legal moves are generated square by square over the mailbox
//! board, then filtered by playing each one and rejecting those that leave
//! the mover's king attacked.

use crate::board::{DIAG_DIRS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHO_DIRS, Position};
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    // Filter illegal moves in-place by playing them on the mutable position.
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move;

    for from in 0..64u8 {
        let Some(pc) = pos.piece_at(from) else {
            continue;
        };
        if pc.color != us {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn_moves(pos, from, us, out),
            PieceKind::Knight => gen_leaper_moves(pos, from, us, &KNIGHT_OFFSETS, out),
            PieceKind::King => gen_leaper_moves(pos, from, us, &KING_OFFSETS, out),
            PieceKind::Bishop => gen_slider_moves(pos, from, us, &DIAG_DIRS, out),
            PieceKind::Rook => gen_slider_moves(pos, from, us, &ORTHO_DIRS, out),
            PieceKind::Queen => {
                gen_slider_moves(pos, from, us, &DIAG_DIRS, out);
                gen_slider_moves(pos, from, us, &ORTHO_DIRS, out);
            }
        }
    }

    gen_castling_moves(pos, us, out);
}

/// Pawn pushes, double pushes, captures, en passant and promotions.
fn gen_pawn_moves(pos: &Position, from: u8, us: Color, out: &mut Vec<Move>) {
    let (dir, start_rank, promo_rank): (i8, i8, i8) = match us {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };
    let f = file_of(from);
    let r = rank_of(from);

    // Pushes
    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        if rank_of(to) == promo_rank {
            add_promotions(from, to, None, out);
        } else {
            out.push(Move::new(from, to));
        }

        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2));
        }
    }

    // Diagonal captures
    for df in [-1i8, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        if let Some(victim) = pos.piece_at(to) {
            if victim.color != us {
                if rank_of(to) == promo_rank {
                    add_promotions(from, to, Some(victim.kind), out);
                } else {
                    out.push(Move::capturing(from, to, victim.kind));
                }
            }
        } else if pos.en_passant == Some(to) {
            let mut mv = Move::capturing(from, to, PieceKind::Pawn);
            mv.is_en_passant = true;
            out.push(mv);
        }
    }
}

fn add_promotions(from: u8, to: u8, capture: Option<PieceKind>, out: &mut Vec<Move>) {
    for pk in [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ] {
        out.push(Move {
            from,
            to,
            capture,
            promo: Some(pk),
            is_en_passant: false,
            is_castle: false,
        });
    }
}

/// Knight and king moves from a fixed offset table.
fn gen_leaper_moves(pos: &Position, from: u8, us: Color, offsets: &[(i8, i8)], out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    for &(df, dr) in offsets {
        let Some(to) = sq(f + df, r + dr) else {
            continue;
        };
        match pos.piece_at(to) {
            None => out.push(Move::new(from, to)),
            Some(pc) if pc.color != us => out.push(Move::capturing(from, to, pc.kind)),
            Some(_) => {}
        }
    }
}

/// Bishop, rook and queen rays: walk until a piece or the edge.
fn gen_slider_moves(pos: &Position, from: u8, us: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    for &(df, dr) in dirs {
        let mut tf = f + df;
        let mut tr = r + dr;
        while let Some(to) = sq(tf, tr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != us {
                        out.push(Move::capturing(from, to, pc.kind));
                    }
                    break;
                }
            }
            tf += df;
            tr += dr;
        }
    }
}

fn gen_castling_moves(pos: &Position, us: Color, out: &mut Vec<Move>) {
    // Can't castle out of check.
    if pos.in_check(us) {
        return;
    }
    // Rights without the king on its home square only happen in
    // hand-written FENs; treat them as no rights.
    let king_home: u8 = match us {
        Color::White => 4,
        Color::Black => 60,
    };
    if pos.piece_at(king_home)
        != Some(Piece {
            color: us,
            kind: PieceKind::King,
        })
    {
        return;
    }
    let enemy = us.other();
    let empty = |s: u8| pos.piece_at(s).is_none();
    let safe = |s: u8| !pos.is_square_attacked(s, enemy);
    // Rights can outlive the rook in hand-written FENs; verify it.
    let rook_at = |s: u8| {
        pos.piece_at(s)
            == Some(Piece {
                color: us,
                kind: PieceKind::Rook,
            })
    };

    let mut push_castle = |from: u8, to: u8| {
        let mut mv = Move::new(from, to);
        mv.is_castle = true;
        out.push(mv);
    };

    match us {
        Color::White => {
            // King side: e1 -> g1, f1/g1 empty and not attacked
            if pos.castling.wk && rook_at(7) && empty(5) && empty(6) && safe(5) && safe(6) {
                push_castle(4, 6);
            }
            // Queen side: e1 -> c1, b1/c1/d1 empty, c1/d1 not attacked
            if pos.castling.wq && rook_at(0) && empty(1) && empty(2) && empty(3) && safe(2) && safe(3)
            {
                push_castle(4, 2);
            }
        }
        Color::Black => {
            if pos.castling.bk && rook_at(63) && empty(61) && empty(62) && safe(61) && safe(62) {
                push_castle(60, 62);
            }
            if pos.castling.bq
                && rook_at(56)
                && empty(57)
                && empty(58)
                && empty(59)
                && safe(58)
                && safe(59)
            {
                push_castle(60, 58);
            }
        }
    }
}
