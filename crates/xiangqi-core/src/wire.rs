//! The session payload exchanged with the relay: the initial position
//! string plus the ordered move list. This is both the initialization
//! payload for a newly joined peer and the broadcast after every ply.

use serde::{Deserialize, Serialize};

use crate::fen::START_FEN;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The 6-field position string the game started from.
    pub fen: String,
    /// Every applied move, as 4-character notation, in order.
    pub moves: Vec<String>,
}

impl GameState {
    /// A fresh game from the standard opening layout.
    pub fn starting() -> GameState {
        GameState {
            fen: START_FEN.to_string(),
            moves: Vec::new(),
        }
    }
}

impl Default for GameState {
    fn default() -> GameState {
        GameState::starting()
    }
}
