use thiserror::Error;

/// Failures turning user-supplied text into positions or moves.
///
/// These are the recoverable errors of the crate: callers re-prompt or
/// reject the input. Board-state corruption (a missing king, an undo
/// without a matching make) is a programming error and panics instead.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid FEN ({0})")]
    Fen(String),
    #[error("unrecognized or illegal move: {0}")]
    San(String),
}
