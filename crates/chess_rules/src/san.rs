//! Standard Algebraic Notation.
//!
//! Rendering builds the SAN string for a generated move (disambiguation,
//! capture marker, promotion, check/mate suffix). Parsing goes the other
//! way around: every legal move is rendered and matched against the user's
//! input, so flags (castling, en passant) are always correct and illegal
//! input is rejected in the same pass. Plain coordinate input ("e2e4",
//! "e7e8q") is accepted as well.

use crate::board::Position;
use crate::error::ParseError;
use crate::movegen::legal_moves;
use crate::types::*;

/// Render `mv` (which must be legal in `pos`) as SAN.
pub fn move_to_san(pos: &Position, mv: Move) -> String {
    let mut san = String::new();

    if mv.is_castle {
        san.push_str(if file_of(mv.to) == 6 { "O-O" } else { "O-O-O" });
        san.push_str(&suffix(pos, mv));
        return san;
    }

    let piece = pos
        .piece_at(mv.from)
        .expect("SAN rendering of a move with an empty from-square");

    match piece.kind {
        PieceKind::Pawn => {
            if mv.capture.is_some() {
                san.push((b'a' + (mv.from % 8)) as char);
                san.push('x');
            }
        }
        kind => {
            san.push(kind.letter().to_ascii_uppercase());
            san.push_str(&disambiguation(pos, mv, kind));
            if mv.capture.is_some() {
                san.push('x');
            }
        }
    }

    san.push_str(&sq_to_coord(mv.to));

    if let Some(promo) = mv.promo {
        san.push('=');
        san.push(promo.letter().to_ascii_uppercase());
    }

    san.push_str(&suffix(pos, mv));
    san
}

/// Parse one SAN (or coordinate) move against the legal moves of `pos`.
pub fn move_from_san(pos: &Position, input: &str) -> Result<Move, ParseError> {
    let wanted = normalize(input);
    if wanted.is_empty() {
        return Err(ParseError::San(input.to_string()));
    }

    let legals = legal_moves(pos);

    // Coordinate form first: from-square, to-square, optional promotion.
    if let Some(mv) = match_coordinate(&legals, &wanted) {
        return Ok(mv);
    }

    for &mv in &legals {
        if normalize(&move_to_san(pos, mv)) == wanted {
            return Ok(mv);
        }
    }
    Err(ParseError::San(input.to_string()))
}

/// File/rank disambiguation among same-kind moves to the same square.
fn disambiguation(pos: &Position, mv: Move, kind: PieceKind) -> String {
    let rivals: Vec<u8> = legal_moves(pos)
        .iter()
        .filter(|m| {
            m.to == mv.to
                && m.from != mv.from
                && pos.piece_at(m.from).map(|p| p.kind) == Some(kind)
        })
        .map(|m| m.from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let file = (b'a' + (mv.from % 8)) as char;
    let rank = (b'1' + (mv.from / 8)) as char;
    if !rivals.iter().any(|&s| file_of(s) == file_of(mv.from)) {
        file.to_string()
    } else if !rivals.iter().any(|&s| rank_of(s) == rank_of(mv.from)) {
        rank.to_string()
    } else {
        format!("{file}{rank}")
    }
}

/// "+" when the move gives check, "#" when it mates.
fn suffix(pos: &Position, mv: Move) -> String {
    let mut after = pos.clone();
    after.make_move(mv);
    if !after.in_check(after.side_to_move) {
        return String::new();
    }
    if legal_moves(&after).is_empty() {
        "#".to_string()
    } else {
        "+".to_string()
    }
}

/// Strip annotations and unify castling spellings so "0-0+!" == "O-O".
fn normalize(s: &str) -> String {
    let trimmed: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, '+' | '#' | '!' | '?'))
        .collect();
    match trimmed.as_str() {
        "0-0" | "o-o" => "O-O".to_string(),
        "0-0-0" | "o-o-o" => "O-O-O".to_string(),
        _ => trimmed,
    }
}

fn match_coordinate(legals: &[Move], wanted: &str) -> Option<Move> {
    let b = wanted.as_bytes();
    if b.len() != 4 && b.len() != 5 {
        return None;
    }
    let from = coord_to_sq(&wanted[0..2])?;
    let to = coord_to_sq(&wanted[2..4])?;
    let promo = if b.len() == 5 {
        Some(match b[4].to_ascii_lowercase() {
            b'q' => PieceKind::Queen,
            b'r' => PieceKind::Rook,
            b'b' => PieceKind::Bishop,
            b'n' => PieceKind::Knight,
            _ => return None,
        })
    } else {
        None
    };

    legals
        .iter()
        .find(|m| m.from == from && m.to == to && (promo.is_none() || m.promo == promo))
        .copied()
}

#[cfg(test)]
#[path = "san_tests.rs"]
mod san_tests;
