//! The board state machine: grid, side to move, counters, move history,
//! and the operations the relay and renderer call into.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::Error;
use crate::fen::{self, ParseError, START_FEN};
use crate::piece::{Piece, Side};
use crate::rules::{self, MoveError};
use crate::square::{Square, FILES, RANKS};
use crate::wire::GameState;

/// The 10×9 grid of cells, indexed `[rank][file]`.
pub type Grid = [[Option<Piece>; FILES]; RANKS];

/// One applied ply. The captured cell and the pre-move half-move clock
/// are retained so the ply can be undone exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The 4-character move notation as it was applied.
    pub notation: String,
    /// What stood on the destination square, if anything.
    pub captured: Option<Piece>,
    src: Square,
    dst: Square,
    halfmove_before: u32,
}

/// One cell of a rendering matrix: the square's wire reference plus its
/// contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCell {
    pub square: Square,
    pub piece: Option<Piece>,
}

/// A full game state. Constructed from a position string (optionally
/// replaying a recorded move list), mutated one ply at a time by
/// [`Board::apply_move`], and serialized back to a [`GameState`]
/// snapshot for the wire. A rejected move leaves every field untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    /// The position string the game started from, kept verbatim; only
    /// this plus the move list ever travels over the wire.
    initial_fen: String,
    side_to_move: Side,
    halfmove_clock: u32,
    round: u32,
    history: Vec<HistoryEntry>,
}

fn move_notation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^[a-i][0-9][a-i][0-9]$").unwrap())
}

impl Board {
    /// The standard opening position, Red to move.
    pub fn new() -> Board {
        Board::from_fen(START_FEN).expect("the standard opening layout parses")
    }

    /// Build a board from a position string alone.
    pub fn from_fen(fen: &str) -> Result<Board, ParseError> {
        let pos = fen::parse(fen)?;
        Ok(Board {
            grid: pos.grid,
            initial_fen: fen.to_string(),
            side_to_move: pos.side_to_move,
            halfmove_clock: pos.halfmove_clock,
            round: pos.round,
            history: Vec::new(),
        })
    }

    /// Build a board from a position string and replay a recorded move
    /// list on top of it, propagating the first move that fails.
    pub fn with_moves(fen: &str, moves: &[String]) -> Result<Board, Error> {
        let mut board = Board::from_fen(fen)?;
        for notation in moves {
            board.apply_move(notation).map_err(|source| Error::Replay {
                notation: notation.clone(),
                source,
            })?;
        }
        Ok(board)
    }

    /// Reconstruct a board from a wire snapshot.
    pub fn from_state(state: &GameState) -> Result<Board, Error> {
        Board::with_moves(&state.fen, &state.moves)
    }

    /// The wire snapshot for this game: the initial position string plus
    /// every applied move's notation, in order.
    pub fn snapshot(&self) -> GameState {
        GameState {
            fen: self.initial_fen.clone(),
            moves: self.history.iter().map(|e| e.notation.clone()).collect(),
        }
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Consecutive non-capturing plies; callers use this for draw rules.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The position string this game started from.
    pub fn initial_fen(&self) -> &str {
        &self.initial_fen
    }

    /// The layout field for the live grid. Diagnostic only; the wire
    /// carries the initial snapshot, never the live grid.
    pub fn layout(&self) -> String {
        fen::format_layout(&self.grid)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.rank][sq.file]
    }

    /// Look up a cell by its two-character reference; `None` for both a
    /// malformed reference and an empty cell.
    pub fn piece_at_ref(&self, reference: &str) -> Option<Piece> {
        self.piece_at(Square::parse(reference)?)
    }

    /// Whether the piece at `reference` belongs to the side to move.
    pub fn is_current_players_piece(&self, reference: &str) -> bool {
        self.piece_at_ref(reference)
            .map(|p| p.side == self.side_to_move)
            .unwrap_or(false)
    }

    /// Whether the two referenced cells hold pieces of the same side.
    /// Two empty cells count as the same (no) side.
    pub fn same_side(&self, a: &str, b: &str) -> bool {
        self.piece_at_ref(a).map(|p| p.side) == self.piece_at_ref(b).map(|p| p.side)
    }

    /// Every occupied cell in reading order, as (reference, piece)
    /// pairs for full-board rendering. Empty cells are omitted; use
    /// [`Board::matrix`] when the renderer needs all 90 cells.
    pub fn pieces(&self) -> Vec<(String, Piece)> {
        Square::all()
            .filter_map(|sq| self.piece_at(sq).map(|p| (sq.reference(), p)))
            .collect()
    }

    /// The full grid as rendering rows from one side's perspective: Red
    /// sees rank 0 at the top, Black sees the board rotated 180°.
    pub fn matrix(&self, perspective: Side) -> Vec<Vec<RenderCell>> {
        let cell = |rank: usize, file: usize| RenderCell {
            square: Square { rank, file },
            piece: self.grid[rank][file],
        };
        match perspective {
            Side::Red => (0..RANKS)
                .map(|rank| (0..FILES).map(|file| cell(rank, file)).collect())
                .collect(),
            Side::Black => (0..RANKS)
                .rev()
                .map(|rank| (0..FILES).rev().map(|file| cell(rank, file)).collect())
                .collect(),
        }
    }

    /// Whether moving the piece at `src` to `dst` is legal; the error
    /// names the violated rule.
    pub fn is_legal_move(&self, src: Square, dst: Square) -> Result<(), MoveError> {
        rules::check_move(self, src, dst)
    }

    /// Occupied cells strictly between two aligned squares, or `None`
    /// when they share neither rank nor file.
    pub fn count_obstacles(&self, a: Square, b: Square) -> Option<usize> {
        rules::count_obstacles(self, a, b)
    }

    /// All destinations the piece at `reference` may legally move to,
    /// as references in reading order. Recomputed from scratch on every
    /// call; the board changes each ply, so there is nothing to cache.
    pub fn possible_moves(&self, reference: &str) -> Vec<String> {
        let Some(src) = Square::parse(reference) else {
            return Vec::new();
        };
        Square::all()
            .filter(|&dst| self.is_legal_move(src, dst).is_ok())
            .map(|dst| dst.reference())
            .collect()
    }

    /// Apply a move given as 4-character notation (source reference +
    /// destination reference). Returns the captured piece, if any. On
    /// any rejection the board is left exactly as it was.
    pub fn apply_move(&mut self, notation: &str) -> Result<Option<Piece>, MoveError> {
        let result = self.try_apply(notation);
        match &result {
            Ok(captured) => {
                tracing::debug!(notation, captured = ?captured, "applied move");
            }
            Err(reason) => {
                tracing::debug!(notation, %reason, "rejected move");
            }
        }
        result
    }

    fn try_apply(&mut self, notation: &str) -> Result<Option<Piece>, MoveError> {
        if !move_notation_re().is_match(notation) {
            return Err(MoveError::BadNotation);
        }
        let src = Square::parse(&notation[..2]).ok_or(MoveError::BadNotation)?;
        let dst = Square::parse(&notation[2..]).ok_or(MoveError::BadNotation)?;
        if src == dst {
            return Err(MoveError::SameSquare);
        }
        rules::check_move(self, src, dst)?;

        let captured = self.grid[dst.rank][dst.file];
        self.history.push(HistoryEntry {
            notation: notation.to_string(),
            captured,
            src,
            dst,
            halfmove_before: self.halfmove_clock,
        });
        self.halfmove_clock = if captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };
        let moving = self.grid[src.rank][src.file].take();
        self.grid[dst.rank][dst.file] = moving;
        self.round = self.derived_round();
        self.side_to_move = self.side_to_move.opponent();
        Ok(captured)
    }

    /// Undo the most recent ply, restoring the grid, the captured cell,
    /// the half-move clock, the round, and the side to move. Returns
    /// `false` when there is nothing to undo.
    pub fn undo_last_move(&mut self) -> bool {
        let Some(entry) = self.history.pop() else {
            return false;
        };
        let moving = self.grid[entry.dst.rank][entry.dst.file].take();
        self.grid[entry.src.rank][entry.src.file] = moving;
        self.grid[entry.dst.rank][entry.dst.file] = entry.captured;
        self.halfmove_clock = entry.halfmove_before;
        self.round = self.derived_round();
        self.side_to_move = self.side_to_move.opponent();
        true
    }

    fn derived_round(&self) -> u32 {
        (self.history.len() as u32 + 1) / 2
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            for cell in row {
                let c = cell.map(Piece::to_char).unwrap_or('.');
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
