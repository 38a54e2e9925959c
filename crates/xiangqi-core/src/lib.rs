//! Xiangqi (Chinese Chess) rules engine.
//!
//! Maintains a 10×9 board parsed from the FEN-like position notation,
//! answers "is this move legal" with a typed reason on rejection,
//! applies and undoes moves, and serializes game state as the
//! `{fen, moves}` payload relayed between peers.
//!
//! The engine is deliberately narrow: no check/checkmate detection
//! (the facing-generals rule stands in for it), no draw adjudication,
//! no search, no transport. Callers own session lifecycle and turn
//! orchestration; a `Board` holds no global state and is exclusively
//! owned by whoever constructed it.

pub mod board;
pub mod error;
pub mod fen;
pub mod piece;
pub mod rules;
pub mod square;
pub mod wire;

pub use board::{Board, Grid, HistoryEntry, RenderCell};
pub use error::Error;
pub use fen::{ParseError, START_FEN};
pub use piece::{Piece, PieceKind, Side};
pub use rules::MoveError;
pub use square::{Square, FILES, RANKS};
pub use wire::GameState;
