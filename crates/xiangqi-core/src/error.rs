//! Crate-level error type for operations that can fail in more than one
//! way (constructing a board from a snapshot parses, then replays).

use crate::fen::ParseError;
use crate::rules::MoveError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("replaying recorded move \"{notation}\": {source}")]
    Replay {
        notation: String,
        source: MoveError,
    },
}
