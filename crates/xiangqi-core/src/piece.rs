//! Piece kinds, sides, and their single-character notation.

use serde::{Deserialize, Serialize};

/// The two sides of a Xiangqi game. Red pieces are written in uppercase
/// in the position notation, Black pieces in lowercase. Red is the `w`
/// side in the side-to-move field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }
}

/// The seven Xiangqi piece kinds. Western names are used for the
/// notation letters; the traditional names are noted alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    /// Advisor (shi), letter `A`.
    Advisor,
    /// Elephant (xiang), letter `B`.
    Bishop,
    /// Cannon (pao), letter `C`.
    Cannon,
    /// General (jiang/shuai), letter `K`.
    King,
    /// Horse (ma), letter `N`.
    Knight,
    /// Soldier (bing/zu), letter `P`.
    Pawn,
    /// Chariot (ju), letter `R`.
    Rook,
}

impl PieceKind {
    fn letter(self) -> char {
        match self {
            PieceKind::Advisor => 'A',
            PieceKind::Bishop => 'B',
            PieceKind::Cannon => 'C',
            PieceKind::King => 'K',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
        }
    }

    fn from_letter(c: char) -> Option<PieceKind> {
        match c {
            'A' => Some(PieceKind::Advisor),
            'B' => Some(PieceKind::Bishop),
            'C' => Some(PieceKind::Cannon),
            'K' => Some(PieceKind::King),
            'N' => Some(PieceKind::Knight),
            'P' => Some(PieceKind::Pawn),
            'R' => Some(PieceKind::Rook),
            _ => None,
        }
    }
}

/// One piece on the board: a kind plus the side that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side) -> Piece {
        Piece { kind, side }
    }

    /// Decode a notation character (one of the 14 recognized piece
    /// letters; case selects the side).
    pub fn from_char(c: char) -> Option<Piece> {
        let side = if c.is_ascii_uppercase() {
            Side::Red
        } else {
            Side::Black
        };
        let kind = PieceKind::from_letter(c.to_ascii_uppercase())?;
        Some(Piece { kind, side })
    }

    /// The notation character for this piece.
    pub fn to_char(self) -> char {
        match self.side {
            Side::Red => self.kind.letter(),
            Side::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char_roundtrip() {
        for c in "RNBAKCPrnbakcp".chars() {
            let piece = Piece::from_char(c).unwrap();
            assert_eq!(piece.to_char(), c);
        }
    }

    #[test]
    fn test_case_selects_side() {
        assert_eq!(Piece::from_char('K').unwrap().side, Side::Red);
        assert_eq!(Piece::from_char('k').unwrap().side, Side::Black);
    }

    #[test]
    fn test_unknown_letter_rejected() {
        assert!(Piece::from_char('Q').is_none());
        assert!(Piece::from_char('x').is_none());
        assert!(Piece::from_char('1').is_none());
    }
}
