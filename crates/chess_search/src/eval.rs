//! Hand-crafted static evaluation.
//!
//! Pure function from a position to a centipawn score, always from White's
//! point of view. Terms: material plus piece-square bonuses, the bishop
//! pair, weighted mobility, pawn-structure penalties, a pawn-shield king
//! safety term outside the endgame and king centralization/proximity
//! inside it. Endgame is detected by a total-material threshold.

use chess_rules::{Color, PieceKind, Position, file_of, legal_moves, rank_of};

/// Material values in centipawns.
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}

/// Two rooks' worth of non-king material left on the board.
const ENDGAME_MATERIAL_THRESHOLD: i32 = 2400;

// Piece-square tables, written rank 8 first from White's point of view.
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

const KING_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

const fn table_for(kind: PieceKind) -> &'static [i32; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_TABLE,
    }
}

/// Piece-square bonus from the owner's point of view.
///
/// The tables are laid out rank 8 first, so a White square flips its rank
/// (`sq ^ 56`); a Black square is rotated 180 degrees first (`63 - sq`),
/// which composes to `sq ^ 7`. Symmetry by rotation, not geometry.
#[inline]
pub fn pst_bonus(kind: PieceKind, sq: u8, color: Color) -> i32 {
    let idx = match color {
        Color::White => sq ^ 56,
        Color::Black => sq ^ 7,
    };
    table_for(kind)[idx as usize]
}

/// Static evaluation in centipawns, positive favoring White.
pub fn static_eval(pos: &Position) -> i32 {
    let mut total = 0i32;
    let mut material = [0i32; 2];
    let mut bishops = [0u32; 2];
    let mut kings: [Option<u8>; 2] = [None, None];
    let mut pawn_files = [[0u8; 8]; 2];

    for s in 0..64u8 {
        let Some(pc) = pos.piece_at(s) else {
            continue;
        };
        let side = pc.color.idx();
        match pc.kind {
            PieceKind::Pawn => {
                material[side] += 100;
                pawn_files[side][(s % 8) as usize] += 1;
            }
            PieceKind::Bishop => {
                material[side] += 330;
                bishops[side] += 1;
            }
            PieceKind::King => kings[side] = Some(s),
            kind => material[side] += piece_value(kind),
        }

        let square_score = piece_value(pc.kind) + pst_bonus(pc.kind, s, pc.color);
        total += if pc.color == Color::White {
            square_score
        } else {
            -square_score
        };
    }

    if bishops[0] >= 2 {
        total += 50;
    }
    if bishops[1] >= 2 {
        total -= 50;
    }

    total += mobility(pos, Color::White);
    total -= mobility(pos, Color::Black);

    total += pawn_structure(&pawn_files[0]);
    total -= pawn_structure(&pawn_files[1]);

    let endgame = is_endgame(material[0], material[1]);

    total += king_safety(pos, kings[0], Color::White, endgame);
    total -= king_safety(pos, kings[1], Color::Black, endgame);

    if endgame
        && let (Some(wk), Some(bk)) = (kings[0], kings[1])
    {
        total += king_activity(wk, bk, Color::White);
        total -= king_activity(bk, wk, Color::Black);
    }

    total
}

/// Weighted count of `side`'s legal moves.
///
/// Both sides are read off the side-to-move's legal move list, so the side
/// not on move contributes nothing. A deliberate approximation: computing
/// true mobility for the waiting side would need a null move.
fn mobility(pos: &Position, side: Color) -> i32 {
    let mut score = 0;
    for mv in legal_moves(pos) {
        let Some(pc) = pos.piece_at(mv.from) else {
            continue;
        };
        if pc.color != side {
            continue;
        }
        score += match pc.kind {
            PieceKind::Knight | PieceKind::Bishop => 4,
            PieceKind::Rook => 2,
            PieceKind::Queen => 1,
            _ => 0,
        };
    }
    score
}

/// Doubled, island and isolated pawn penalties for one side.
fn pawn_structure(file_counts: &[u8; 8]) -> i32 {
    let mut score = 0;

    let mut islands = 0;
    let mut in_island = false;
    for &count in file_counts {
        if count > 0 {
            if count > 1 {
                score -= 10 * (count as i32 - 1);
            }
            if !in_island {
                in_island = true;
                islands += 1;
            }
        } else {
            in_island = false;
        }
    }
    score -= 5 * (islands - 1);

    for file in 0..8usize {
        if file_counts[file] == 0 {
            continue;
        }
        let left = file > 0 && file_counts[file - 1] > 0;
        let right = file < 7 && file_counts[file + 1] > 0;
        if !left && !right {
            score -= 15;
        }
    }

    score
}

/// Pawn-shield bonus in front of the king; a shieldless king is penalized.
/// In the endgame the king is meant to be active, so this term is zero.
fn king_safety(pos: &Position, king: Option<u8>, side: Color, endgame: bool) -> i32 {
    let Some(king) = king else {
        return 0;
    };
    if endgame {
        return 0;
    }

    let dir: i8 = match side {
        Color::White => 1,
        Color::Black => -1,
    };
    let rank = rank_of(king);
    let file = file_of(king);

    let mut shield = 0;
    for df in -1..=1 {
        if let Some(s) = chess_rules::sq(file + df, rank + dir)
            && let Some(pc) = pos.piece_at(s)
            && pc.color == side
            && pc.kind == PieceKind::Pawn
        {
            shield += 10;
        }
    }

    if shield == 0 {
        // No pawn cover at all: exposed king.
        return -20;
    }
    shield
}

/// Endgame king evaluation: centralization plus proximity to the enemy
/// king. The proximity sign flips with the owner so that, once summed into
/// the White-POV total, both kings are pulled toward each other.
fn king_activity(own: u8, opp: u8, side: Color) -> i32 {
    let rank = rank_of(own) as i32;
    let file = file_of(own) as i32;

    // |rank - 3.5| + |file - 3.5| is always integral; compute it doubled.
    let center_dist = ((2 * rank - 7).abs() + (2 * file - 7).abs()) / 2;
    let mut score = -5 * center_dist;

    let king_dist =
        ((rank_of(own) - rank_of(opp)).abs() + (file_of(own) - file_of(opp)).abs()) as i32;
    score += match side {
        Color::White => -2 * king_dist,
        Color::Black => 2 * king_dist,
    };

    // Exposure matters less with the queens off.
    score + 20
}

/// Both sides' non-king material at or below two rooks.
fn is_endgame(white_material: i32, black_material: i32) -> bool {
    white_material + black_material <= ENDGAME_MATERIAL_THRESHOLD
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
