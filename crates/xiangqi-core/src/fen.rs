//! Position-string codec — parses the 6-field FEN-like notation used on
//! the wire into a grid plus counters, and re-serializes the layout field.
//!
//! Reference for the notation: http://www.xqbase.com/protocol/cchess_fen.htm

use crate::board::Grid;
use crate::piece::{Piece, Side};
use crate::square::{FILES, RANKS};

/// The standard opening layout, Red to move.
pub const START_FEN: &str =
    "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected 6 space-separated fields, found {0}")]
    InvalidFieldCount(usize),

    #[error("expected 10 ranks in the layout field, found {0}")]
    InvalidRankCount(usize),

    #[error("unrecognized piece character '{0}'")]
    InvalidPieceChar(char),

    #[error("rank {0} does not expand to exactly 9 files")]
    InvalidRankWidth(usize),

    #[error("counter field is not a number: \"{0}\"")]
    InvalidCounter(String),
}

/// The decoded fields of a position string. Fields 3 and 4 are reserved
/// in this variant (there is no castling or en passant) and are accepted
/// but not retained.
#[derive(Debug, Clone)]
pub struct ParsedPosition {
    pub grid: Grid,
    pub side_to_move: Side,
    pub halfmove_clock: u32,
    pub round: u32,
}

/// Parse a full 6-field position string.
pub fn parse(fen: &str) -> Result<ParsedPosition, ParseError> {
    let fields: Vec<&str> = fen.split(' ').collect();
    if fields.len() != 6 {
        return Err(ParseError::InvalidFieldCount(fields.len()));
    }

    let grid = parse_layout(fields[0])?;

    // The original wire protocol treats anything other than `b` as Red,
    // and peers rely on that; kept as-is.
    let side_to_move = if fields[1] == "b" { Side::Black } else { Side::Red };

    let halfmove_clock = parse_counter(fields[4])?;
    let round = parse_counter(fields[5])?;

    Ok(ParsedPosition {
        grid,
        side_to_move,
        halfmove_clock,
        round,
    })
}

/// Expand the layout field (field 1) into a grid.
fn parse_layout(layout: &str) -> Result<Grid, ParseError> {
    let ranks: Vec<&str> = layout.split('/').collect();
    if ranks.len() != RANKS {
        return Err(ParseError::InvalidRankCount(ranks.len()));
    }

    let mut grid: Grid = [[None; FILES]; RANKS];
    for (rank, text) in ranks.iter().enumerate() {
        let mut file = 0usize;
        for c in text.chars() {
            if ('1'..='9').contains(&c) {
                file += c as usize - '0' as usize;
            } else if let Some(piece) = Piece::from_char(c) {
                if file >= FILES {
                    return Err(ParseError::InvalidRankWidth(rank));
                }
                grid[rank][file] = Some(piece);
                file += 1;
            } else {
                return Err(ParseError::InvalidPieceChar(c));
            }
        }
        if file != FILES {
            return Err(ParseError::InvalidRankWidth(rank));
        }
    }
    Ok(grid)
}

fn parse_counter(field: &str) -> Result<u32, ParseError> {
    field
        .parse()
        .map_err(|_| ParseError::InvalidCounter(field.to_string()))
}

/// Serialize a grid back into a layout field — the exact inverse of
/// [`parse_layout`] (runs of empty cells compress to a digit).
pub fn format_layout(grid: &Grid) -> String {
    let mut out = String::new();
    for (rank, cells) in grid.iter().enumerate() {
        if rank > 0 {
            out.push('/');
        }
        let mut empty = 0u32;
        for cell in cells {
            match cell {
                Some(piece) => {
                    if empty > 0 {
                        out.push(char::from_digit(empty, 10).unwrap_or('9'));
                        empty = 0;
                    }
                    out.push(piece.to_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push(char::from_digit(empty, 10).unwrap_or('9'));
        }
    }
    out
}
