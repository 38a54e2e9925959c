//! Board coordinates and the two-character square reference codec.

use std::fmt;

/// Number of ranks (rows) on the board.
pub const RANKS: usize = 10;
/// Number of files (columns) on the board.
pub const FILES: usize = 9;

/// File letters in order, `a` at file 0.
const FILE_CHARS: [char; FILES] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i'];

/// A board coordinate. Rank 0 is Black's back rank (the first rank-string
/// of the position layout), rank 9 is Red's back rank. File 0 is the `a`
/// file. A square reference is file letter + rank digit, e.g. `a9` for
/// Red's left chariot in the opening position.
///
/// Only [`Square::new`] and [`Square::parse`] construct values, so a
/// `Square` always lies within the 10×9 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub(crate) rank: usize,
    pub(crate) file: usize,
}

impl Square {
    /// Build a square, rejecting out-of-range coordinates.
    pub fn new(rank: usize, file: usize) -> Option<Square> {
        if rank < RANKS && file < FILES {
            Some(Square { rank, file })
        } else {
            None
        }
    }

    pub fn rank(self) -> usize {
        self.rank
    }

    pub fn file(self) -> usize {
        self.file
    }

    /// Parse a two-character square reference. Anything that is not
    /// exactly a recognized file letter followed by a rank digit yields
    /// `None`.
    pub fn parse(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file_c = chars.next()?;
        let rank_c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let file = FILE_CHARS.iter().position(|&c| c == file_c)?;
        let rank = rank_c.to_digit(10)? as usize;
        Some(Square { rank, file })
    }

    /// The two-character reference for this square.
    pub fn reference(self) -> String {
        format!("{}{}", FILE_CHARS[self.file], self.rank)
    }

    /// Iterate every square in reading order (rank 0 file 0 first).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..RANKS).flat_map(|rank| (0..FILES).map(move |file| Square { rank, file }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", FILE_CHARS[self.file], self.rank)
    }
}
