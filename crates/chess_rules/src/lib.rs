//! Chess rules engine: board state, legal move generation, draw and
//! terminal detection, FEN and SAN, and Zobrist position hashing.
//!
//! This crate knows nothing about searching or evaluating positions; it
//! provides the `Position` interface that engines drive via
//! `make_move`/`unmake_move` and `legal_moves`.

pub mod board;
pub mod draw;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod san;
pub mod types;
pub mod zobrist;

pub use board::*;
pub use draw::*;
pub use error::ParseError;
pub use movegen::*;
pub use perft::perft;
pub use san::*;
pub use types::*;
pub use zobrist::ZOBRIST;
