use crate::error::ParseError;
use crate::types::*;
use crate::zobrist::ZOBRIST;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const fn none() -> Self {
        CastlingRights {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        }
    }

    pub const fn all() -> Self {
        CastlingRights {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    /// 4-bit mask used to index the Zobrist castling table.
    #[inline(always)]
    pub fn mask(&self) -> usize {
        (self.wk as usize) | (self.wq as usize) << 1 | (self.bk as usize) << 2 | (self.bq as usize) << 3
    }
}

/// Full game state: mailbox board plus the side-channel fields a legal
/// move needs, and a stack of position hashes for repetition detection.
#[derive(Clone, Debug)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square behind a pawn that just advanced two ranks.
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    /// Hashes of every position reached since construction, current last.
    pub(crate) seen: Vec<u64>,
}

/// State needed to reverse a move. Every [`Position::make_move`] must be
/// paired with an [`Position::unmake_move`] on every control path.
#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    /// (rook_from, rook_to) for castling.
    pub rook_move: Option<(u8, u8)>,
    /// Square actually vacated by an en-passant capture.
    pub ep_captured_sq: Option<u8>,
}

impl Position {
    pub fn startpos() -> Self {
        let mut p = Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            seen: Vec::new(),
        };

        for f in 0..8 {
            p.board[8 + f] = Some(Piece {
                color: Color::White,
                kind: PieceKind::Pawn,
            });
            p.board[48 + f] = Some(Piece {
                color: Color::Black,
                kind: PieceKind::Pawn,
            });
        }
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece {
                color: Color::White,
                kind,
            });
            p.board[56 + f] = Some(Piece {
                color: Color::Black,
                kind,
            });
        }
        p.seen.push(p.zobrist_key());
        p
    }

    /// Forsyth-Edwards Notation parser.
    pub fn from_fen(fen: &str) -> Result<Self, ParseError> {
        let err = |msg: &str| ParseError::Fen(format!("{msg}: {fen}"));

        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(err("expected at least 4 fields"));
        }

        let mut board = [None; 64];
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(err("expected 8 ranks"));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => return Err(err("invalid piece character")),
                    };
                    let Some(s) = sq(file, rank) else {
                        return Err(err("too many files in a rank"));
                    };
                    board[s as usize] = Some(Piece { color, kind });
                    file += 1;
                }
                if file > 8 {
                    return Err(err("too many files in a rank"));
                }
            }
            if file != 8 {
                return Err(err("not enough files in a rank"));
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(err("invalid side to move")),
        };

        let mut castling = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(err("invalid castling character")),
                }
            }
        }

        let en_passant = if parts[3] == "-" {
            None
        } else {
            Some(coord_to_sq(parts[3]).ok_or_else(|| err("invalid en-passant square"))?)
        };

        let halfmove_clock: u32 = parts
            .get(4)
            .copied()
            .unwrap_or("0")
            .parse()
            .map_err(|_| err("invalid halfmove clock"))?;
        let fullmove_number: u32 = parts
            .get(5)
            .copied()
            .unwrap_or("1")
            .parse()
            .map_err(|_| err("invalid fullmove number"))?;

        let mut p = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            seen: Vec::new(),
        };
        p.seen.push(p.zobrist_key());
        Ok(p)
    }

    #[inline(always)]
    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    #[inline(always)]
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    #[inline(always)]
    pub fn white_to_play(&self) -> bool {
        self.side_to_move == Color::White
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        (0..64u8).find(|&i| {
            self.board[i as usize]
                == Some(Piece {
                    color: c,
                    kind: PieceKind::King,
                })
        })
    }

    /// 64-bit position fingerprint, recomputed from scratch on each call.
    ///
    /// Folds pieces, side to move, the castling mask and the en-passant
    /// file; the halfmove clock and move number are deliberately excluded
    /// so repeated positions hash equal.
    pub fn zobrist_key(&self) -> u64 {
        let mut key = 0u64;
        for i in 0..64 {
            if let Some(pc) = self.board[i] {
                key ^= ZOBRIST.pieces[pc.table_idx()][i];
            }
        }
        if self.side_to_move == Color::Black {
            key ^= ZOBRIST.side_to_move;
        }
        key ^= ZOBRIST.castling[self.castling.mask()];
        if let Some(ep) = self.en_passant {
            key ^= ZOBRIST.en_passant[(ep % 8) as usize];
        }
        key
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);

        // Pawns attack the target from the rank behind it (relative to `by`).
        let pawn_dirs: &[(i8, i8)] = match by {
            Color::White => &[(-1, -1), (1, -1)],
            Color::Black => &[(-1, 1), (1, 1)],
        };
        for &(df, dr) in pawn_dirs {
            if let Some(s) = sq(tf + df, tr + dr)
                && self.piece_at(s)
                    == Some(Piece {
                        color: by,
                        kind: PieceKind::Pawn,
                    })
            {
                return true;
            }
        }

        for &(df, dr) in &KNIGHT_OFFSETS {
            if let Some(s) = sq(tf + df, tr + dr)
                && self.piece_at(s)
                    == Some(Piece {
                        color: by,
                        kind: PieceKind::Knight,
                    })
            {
                return true;
            }
        }

        for &(df, dr) in &KING_OFFSETS {
            if let Some(s) = sq(tf + df, tr + dr)
                && self.piece_at(s)
                    == Some(Piece {
                        color: by,
                        kind: PieceKind::King,
                    })
            {
                return true;
            }
        }

        // Sliders: walk each ray until the first occupied square.
        for &(df, dr) in &DIAG_DIRS {
            if self.ray_hits(tf, tr, df, dr, by, PieceKind::Bishop) {
                return true;
            }
        }
        for &(df, dr) in &ORTHO_DIRS {
            if self.ray_hits(tf, tr, df, dr, by, PieceKind::Rook) {
                return true;
            }
        }

        false
    }

    /// Walks one ray; true if the first piece met is `by`-colored and is
    /// either `slider` or a queen.
    fn ray_hits(&self, tf: i8, tr: i8, df: i8, dr: i8, by: Color, slider: PieceKind) -> bool {
        let mut f = tf + df;
        let mut r = tr + dr;
        while let Some(s) = sq(f, r) {
            if let Some(pc) = self.piece_at(s) {
                return pc.color == by && (pc.kind == slider || pc.kind == PieceKind::Queen);
            }
            f += df;
            r += dr;
        }
        false
    }

    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("no piece on from-square");
        let mut captured = self.piece_at(to);
        let prev_castling = self.castling.clone();
        let prev_ep = self.en_passant;
        let prev_hmc = self.halfmove_clock;
        let prev_fmn = self.fullmove_number;

        self.en_passant = None;

        let mut reset_hmc = moved.kind == PieceKind::Pawn || captured.is_some();

        // En-passant removes a pawn from a square other than `to`.
        let mut ep_captured_sq = None;
        if mv.is_en_passant {
            let dir = match moved.color {
                Color::White => -1,
                Color::Black => 1,
            };
            if let Some(cs) = sq(file_of(to), rank_of(to) + dir) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
                ep_captured_sq = Some(cs);
                reset_hmc = true;
            }
        }

        self.set_piece(from, None);
        self.set_piece(to, Some(moved));

        if moved.kind == PieceKind::Pawn {
            let r = rank_of(to);
            if (moved.color == Color::White && r == 7) || (moved.color == Color::Black && r == 0) {
                let promo = mv.promo.unwrap_or(PieceKind::Queen);
                self.set_piece(
                    to,
                    Some(Piece {
                        color: moved.color,
                        kind: promo,
                    }),
                );
                reset_hmc = true;
            }
        }

        // Castling carries the rook along.
        let mut rook_move = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            let (rf, rt) = match (moved.color, from, to) {
                (Color::White, 4, 6) => (7, 5),
                (Color::White, 4, 2) => (0, 3),
                (Color::Black, 60, 62) => (63, 61),
                (Color::Black, 60, 58) => (56, 59),
                _ => (255, 255),
            };
            if rf != 255 {
                let rook = self.piece_at(rf).expect("castling without a rook");
                self.set_piece(rf, None);
                self.set_piece(rt, Some(rook));
                rook_move = Some((rf, rt));
            }
        }

        // Moving the king or a rook off its home square forfeits rights.
        match moved.color {
            Color::White => {
                if moved.kind == PieceKind::King {
                    self.castling.wk = false;
                    self.castling.wq = false;
                }
                if moved.kind == PieceKind::Rook {
                    if from == 0 {
                        self.castling.wq = false;
                    }
                    if from == 7 {
                        self.castling.wk = false;
                    }
                }
            }
            Color::Black => {
                if moved.kind == PieceKind::King {
                    self.castling.bk = false;
                    self.castling.bq = false;
                }
                if moved.kind == PieceKind::Rook {
                    if from == 56 {
                        self.castling.bq = false;
                    }
                    if from == 63 {
                        self.castling.bk = false;
                    }
                }
            }
        }
        // So does losing a rook on its home square.
        if let Some(cp) = captured
            && cp.kind == PieceKind::Rook
        {
            match cp.color {
                Color::White => {
                    if to == 0 {
                        self.castling.wq = false;
                    }
                    if to == 7 {
                        self.castling.wk = false;
                    }
                }
                Color::Black => {
                    if to == 56 {
                        self.castling.bq = false;
                    }
                    if to == 63 {
                        self.castling.bk = false;
                    }
                }
            }
        }

        // Double pawn push exposes the passed-over square.
        if moved.kind == PieceKind::Pawn {
            let fr = rank_of(from);
            let tr = rank_of(to);
            if (moved.color == Color::White && fr == 1 && tr == 3)
                || (moved.color == Color::Black && fr == 6 && tr == 4)
            {
                self.en_passant = sq(file_of(from), (fr + tr) / 2);
            }
        }

        self.halfmove_clock = if reset_hmc {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        self.seen.push(self.zobrist_key());

        Undo {
            captured,
            castling: prev_castling,
            en_passant: prev_ep,
            halfmove_clock: prev_hmc,
            fullmove_number: prev_fmn,
            moved_piece: moved,
            rook_move,
            ep_captured_sq,
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.seen.pop();

        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        let from = mv.from;
        let to = mv.to;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt).expect("castling undo without a rook");
            self.set_piece(rt, None);
            self.set_piece(rf, Some(rook));
        }

        // A promoted pawn goes back as a pawn.
        let mut piece_on_to = self.piece_at(to).expect("no piece on to-square");
        if undo.moved_piece.kind == PieceKind::Pawn {
            let r = rank_of(to);
            if (undo.moved_piece.color == Color::White && r == 7)
                || (undo.moved_piece.color == Color::Black && r == 0)
            {
                piece_on_to = Piece {
                    color: undo.moved_piece.color,
                    kind: PieceKind::Pawn,
                };
            }
        }

        self.set_piece(to, None);
        self.set_piece(from, Some(piece_on_to));

        if mv.is_en_passant {
            if let Some(cs) = undo.ep_captured_sq {
                self.set_piece(cs, undo.captured);
            }
        } else {
            self.set_piece(to, undo.captured);
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let s = (rank * 8 + file) as u8;
                let c = match self.piece_at(s) {
                    Some(pc) => pc.letter(),
                    None => '.',
                };
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        writeln!(f, "   a b c d e f g h")
    }
}

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAG_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHO_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
