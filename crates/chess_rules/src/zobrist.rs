//! Zobrist hashing for chess positions.
//!
//! The hash is the XOR of random values for:
//! - each piece on each square (12 pieces x 64 squares),
//! - side to move (one value, folded in when Black is to move),
//! - the castling-rights state (16 values, indexed by a 4-bit mask),
//! - the en-passant file (8 values).
//!
//! Tables are generated at compile time from a fixed seed, so keys are
//! reproducible across runs and builds.

/// Pre-computed random values for Zobrist hashing.
pub struct ZobristKeys {
    /// Indexed by [`Piece::table_idx`][crate::Piece::table_idx] then square.
    pub pieces: [[u64; 64]; 12],
    /// XORed in when Black is to move.
    pub side_to_move: u64,
    /// Indexed by the castling mask: bit 0 = White O-O, bit 1 = White O-O-O,
    /// bit 2 = Black O-O, bit 3 = Black O-O-O.
    pub castling: [u64; 16],
    /// Indexed by the en-passant target file.
    pub en_passant: [u64; 8],
}

impl ZobristKeys {
    const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        // Fixed seed so every run sees the same keys.
        let mut state = 0x9E37_79B9_7F4A_7C15u64;

        let mut pieces = [[0u64; 64]; 12];
        let mut p = 0;
        while p < 12 {
            let mut sq = 0;
            while sq < 64 {
                state = xorshift64(state);
                pieces[p][sq] = state;
                sq += 1;
            }
            p += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        let mut castling = [0u64; 16];
        let mut i = 0;
        while i < 16 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }
}

/// Global Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
