//! Per-piece move legality.
//!
//! Rank indices run 0 (Black's back rank) to 9 (Red's back rank). The
//! river lies between ranks 4 and 5; each palace is files 3-5 on ranks
//! 0-2 (Black) or 7-9 (Red). Red soldiers advance toward rank 0, Black
//! soldiers toward rank 9.

use crate::board::Board;
use crate::piece::{PieceKind, Side};
use crate::square::Square;

/// Why a proposed move was rejected. One variant per rule, so callers
/// can branch on the cause instead of matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("move notation must be two square references")]
    BadNotation,

    #[error("source and destination are the same square")]
    SameSquare,

    #[error("no piece at the source square")]
    NoPieceAtSource,

    #[error("cannot capture a piece on the same side")]
    FriendlyFire,

    #[error("piece cannot leave its palace")]
    OutOfPalace,

    #[error("advisors move exactly one diagonal step")]
    NotDiagonalStep,

    #[error("elephants never cross the river")]
    CrossedRiver,

    #[error("elephants move exactly two diagonal steps")]
    NotDiagonalLeap,

    #[error("the path is blocked")]
    Blocked,

    #[error("the move is not along a straight line")]
    NotStraightLine,

    #[error("cannons cannot capture without a screen piece in between")]
    CannonCannotCaptureAdjacent,

    #[error("a cannon jump must land on an enemy piece")]
    CannonMustJumpToCapture,

    #[error("too many pieces between source and destination")]
    TooManyObstacles,

    #[error("the kings do not share a rank or file")]
    KingsNotAligned,

    #[error("the facing kings are blocked")]
    KingsBlocked,

    #[error("this piece moves exactly one step")]
    NotOneStep,

    #[error("horses move in an L shape")]
    InvalidKnightShape,

    #[error("soldiers cannot move sideways before crossing the river")]
    SidewaysBeforeRiver,

    #[error("soldiers never move backward")]
    MovedBackward,
}

/// Check whether moving the piece at `src` to `dst` is legal on the
/// given board. Side-to-move is deliberately not consulted here; the
/// caller decides whose turn it is.
pub(crate) fn check_move(board: &Board, src: Square, dst: Square) -> Result<(), MoveError> {
    let piece = board.piece_at(src).ok_or(MoveError::NoPieceAtSource)?;
    let target = board.piece_at(dst);
    if target.map(|t| t.side) == Some(piece.side) {
        return Err(MoveError::FriendlyFire);
    }

    match piece.kind {
        PieceKind::Advisor => advisor_move(piece.side, src, dst),
        PieceKind::Bishop => bishop_move(board, piece.side, src, dst),
        PieceKind::Cannon => cannon_move(board, src, dst, target.is_some()),
        PieceKind::King => king_move(board, piece.side, src, dst, target.map(|t| t.kind)),
        PieceKind::Knight => knight_move(board, src, dst),
        PieceKind::Pawn => pawn_move(piece.side, src, dst),
        PieceKind::Rook => rook_move(board, src, dst),
    }
}

/// Count occupied cells strictly between two squares sharing a rank or
/// file; `None` when they share neither (not a straight line).
pub(crate) fn count_obstacles(board: &Board, a: Square, b: Square) -> Option<usize> {
    if a.rank == b.rank {
        let (lo, hi) = (a.file.min(b.file), a.file.max(b.file));
        let count = ((lo + 1)..hi)
            .filter(|&file| board.piece_at(Square { rank: a.rank, file }).is_some())
            .count();
        Some(count)
    } else if a.file == b.file {
        let (lo, hi) = (a.rank.min(b.rank), a.rank.max(b.rank));
        let count = ((lo + 1)..hi)
            .filter(|&rank| board.piece_at(Square { rank, file: a.file }).is_some())
            .count();
        Some(count)
    } else {
        None
    }
}

fn deltas(src: Square, dst: Square) -> (isize, isize) {
    (
        dst.rank as isize - src.rank as isize,
        dst.file as isize - src.file as isize,
    )
}

fn in_palace(side: Side, sq: Square) -> bool {
    let rank_ok = match side {
        Side::Red => sq.rank >= 7,
        Side::Black => sq.rank <= 2,
    };
    rank_ok && (3..=5).contains(&sq.file)
}

fn advisor_move(side: Side, src: Square, dst: Square) -> Result<(), MoveError> {
    if !in_palace(side, dst) {
        return Err(MoveError::OutOfPalace);
    }
    let (dr, df) = deltas(src, dst);
    if dr.abs() != 1 || df.abs() != 1 {
        return Err(MoveError::NotDiagonalStep);
    }
    Ok(())
}

fn bishop_move(board: &Board, side: Side, src: Square, dst: Square) -> Result<(), MoveError> {
    let home_side = match side {
        Side::Red => dst.rank >= 5,
        Side::Black => dst.rank <= 4,
    };
    if !home_side {
        return Err(MoveError::CrossedRiver);
    }
    let (dr, df) = deltas(src, dst);
    if dr.abs() != 2 || df.abs() != 2 {
        return Err(MoveError::NotDiagonalLeap);
    }
    let eye = Square {
        rank: (src.rank + dst.rank) / 2,
        file: (src.file + dst.file) / 2,
    };
    if board.piece_at(eye).is_some() {
        return Err(MoveError::Blocked);
    }
    Ok(())
}

fn cannon_move(
    board: &Board,
    src: Square,
    dst: Square,
    capturing: bool,
) -> Result<(), MoveError> {
    let screens = count_obstacles(board, src, dst).ok_or(MoveError::NotStraightLine)?;
    match (screens, capturing) {
        (0, false) => Ok(()),
        (0, true) => Err(MoveError::CannonCannotCaptureAdjacent),
        (1, true) => Ok(()),
        (1, false) => Err(MoveError::CannonMustJumpToCapture),
        _ => Err(MoveError::TooManyObstacles),
    }
}

fn king_move(
    board: &Board,
    side: Side,
    src: Square,
    dst: Square,
    target_kind: Option<PieceKind>,
) -> Result<(), MoveError> {
    if target_kind == Some(PieceKind::King) {
        // Facing generals: the opposing king is capturable only along a
        // fully clear rank or file.
        return match count_obstacles(board, src, dst) {
            None => Err(MoveError::KingsNotAligned),
            Some(0) => Ok(()),
            Some(_) => Err(MoveError::KingsBlocked),
        };
    }
    if !in_palace(side, dst) {
        return Err(MoveError::OutOfPalace);
    }
    let (dr, df) = deltas(src, dst);
    if dr.abs() + df.abs() != 1 {
        return Err(MoveError::NotOneStep);
    }
    Ok(())
}

fn knight_move(board: &Board, src: Square, dst: Square) -> Result<(), MoveError> {
    let (dr, df) = deltas(src, dst);
    // The hobbling cell sits one step from the source along the longer
    // axis of the L.
    let leg = match (dr.abs(), df.abs()) {
        (1, 2) => Square {
            rank: src.rank,
            file: (src.file as isize + df.signum()) as usize,
        },
        (2, 1) => Square {
            rank: (src.rank as isize + dr.signum()) as usize,
            file: src.file,
        },
        _ => return Err(MoveError::InvalidKnightShape),
    };
    if board.piece_at(leg).is_some() {
        return Err(MoveError::Blocked);
    }
    Ok(())
}

fn pawn_move(side: Side, src: Square, dst: Square) -> Result<(), MoveError> {
    let (dr, df) = deltas(src, dst);
    if dr.abs() + df.abs() != 1 {
        return Err(MoveError::NotOneStep);
    }
    if dr == 0 {
        let crossed = match side {
            Side::Red => src.rank <= 4,
            Side::Black => src.rank >= 5,
        };
        if !crossed {
            return Err(MoveError::SidewaysBeforeRiver);
        }
    }
    let backward = match side {
        Side::Red => dr == 1,
        Side::Black => dr == -1,
    };
    if backward {
        return Err(MoveError::MovedBackward);
    }
    Ok(())
}

fn rook_move(board: &Board, src: Square, dst: Square) -> Result<(), MoveError> {
    match count_obstacles(board, src, dst) {
        None => Err(MoveError::NotStraightLine),
        Some(0) => Ok(()),
        Some(_) => Err(MoveError::Blocked),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    fn check(board: &Board, mv: &str) -> Result<(), MoveError> {
        let src = Square::parse(&mv[..2]).unwrap();
        let dst = Square::parse(&mv[2..]).unwrap();
        check_move(board, src, dst)
    }

    #[test]
    fn test_universal_checks() {
        let b = Board::new();
        assert_eq!(check(&b, "e4e5"), Err(MoveError::NoPieceAtSource));
        // Red chariot onto the Red horse next to it.
        assert_eq!(check(&b, "a9b9"), Err(MoveError::FriendlyFire));
    }

    #[test]
    fn test_advisor_rules() {
        let b = Board::new();
        assert_eq!(check(&b, "d9e8"), Ok(()));
        assert_eq!(check(&b, "d9d8"), Err(MoveError::NotDiagonalStep));
        assert_eq!(check(&b, "d9c8"), Err(MoveError::OutOfPalace));
        // Black advisor mirrored.
        assert_eq!(check(&b, "d0e1"), Ok(()));
        assert_eq!(check(&b, "d0c1"), Err(MoveError::OutOfPalace));
    }

    #[test]
    fn test_bishop_rules() {
        let b = Board::new();
        assert_eq!(check(&b, "c9e7"), Ok(()));
        assert_eq!(check(&b, "c9a7"), Ok(()));
        assert_eq!(check(&b, "c9d8"), Err(MoveError::NotDiagonalLeap));
        // A lone elephant trying to leap across the river.
        let b = board("9/9/9/9/2b6/9/9/9/9/4K4 b - - 0 1");
        assert_eq!(check(&b, "c4e6"), Err(MoveError::CrossedRiver));
        assert_eq!(check(&b, "c4e2"), Ok(()));
        // Blocked eye.
        let b = board("9/9/9/3p5/2b6/9/9/9/9/4K4 b - - 0 1");
        assert_eq!(check(&b, "c4e2"), Err(MoveError::Blocked));
    }

    #[test]
    fn test_knight_rules() {
        let b = Board::new();
        assert_eq!(check(&b, "b9a7"), Ok(()));
        assert_eq!(check(&b, "b9c7"), Ok(()));
        assert_eq!(check(&b, "b9d8"), Err(MoveError::Blocked));
        assert_eq!(check(&b, "b9b6"), Err(MoveError::InvalidKnightShape));
        // The friendly cannon on b7 trips the universal check before the
        // shape is ever examined.
        assert_eq!(check(&b, "b9b7"), Err(MoveError::FriendlyFire));
        // Hobbled: the soldier on b6 blocks the jumps toward rank 7.
        let b = board("9/9/9/9/9/1n7/1P7/9/9/4K4 w - - 0 1");
        assert_eq!(check(&b, "b5d4"), Ok(()));
        assert_eq!(check(&b, "b5a7"), Err(MoveError::Blocked));
    }

    #[test]
    fn test_pawn_rules() {
        let b = Board::new();
        assert_eq!(check(&b, "e6e5"), Ok(()));
        assert_eq!(check(&b, "e6e4"), Err(MoveError::NotOneStep));
        assert_eq!(check(&b, "e6d6"), Err(MoveError::SidewaysBeforeRiver));
        assert_eq!(check(&b, "e6e7"), Err(MoveError::MovedBackward));
        // A Red soldier across the river may step sideways, never back.
        let b = board("9/9/9/4P4/9/9/9/9/9/4K4 w - - 0 1");
        assert_eq!(check(&b, "e3d3"), Ok(()));
        assert_eq!(check(&b, "e3e2"), Ok(()));
        assert_eq!(check(&b, "e3e4"), Err(MoveError::MovedBackward));
    }

    #[test]
    fn test_rook_rules() {
        let b = Board::new();
        assert_eq!(check(&b, "a9a8"), Ok(()));
        assert_eq!(check(&b, "a9a7"), Ok(()));
        // The soldier on a6 blocks the rest of the file.
        assert_eq!(check(&b, "a9a5"), Err(MoveError::Blocked));
        assert_eq!(check(&b, "a9b8"), Err(MoveError::NotStraightLine));
    }

    #[test]
    fn test_cannon_rules() {
        let b = Board::new();
        // Quiet slide along a clear line.
        assert_eq!(check(&b, "b7b4"), Ok(()));
        // Capture the back-rank horse over the enemy cannon screen.
        assert_eq!(check(&b, "b7b0"), Ok(()));
        // Capturing that screen itself: no piece in between.
        assert_eq!(check(&b, "b7b2"), Err(MoveError::CannonCannotCaptureAdjacent));
        // Jump landing on an empty square.
        let b = board("4k4/9/9/9/9/9/9/4p4/9/4C4 w - - 0 1");
        assert_eq!(check(&b, "e9e4"), Err(MoveError::CannonMustJumpToCapture));
        assert_eq!(check(&b, "e9e0"), Ok(()));
        // Two screens is one too many.
        let b = board("4k4/9/9/9/9/4p4/9/4p4/9/4C4 w - - 0 1");
        assert_eq!(check(&b, "e9e0"), Err(MoveError::TooManyObstacles));
        assert_eq!(check(&b, "e9d9"), Ok(()));
        assert_eq!(check(&b, "e9d8"), Err(MoveError::NotStraightLine));
    }

    #[test]
    fn test_king_rules() {
        let b = Board::new();
        assert_eq!(check(&b, "e9e8"), Ok(()));
        assert_eq!(check(&b, "e9d8"), Err(MoveError::NotOneStep));
        // Facing generals on a clear file.
        let b = board("4k4/9/9/9/9/9/9/9/9/4K4 w - - 0 1");
        assert_eq!(check(&b, "e9e0"), Ok(()));
        let b = board("4k4/9/9/9/4p4/9/9/9/9/4K4 w - - 0 1");
        assert_eq!(check(&b, "e9e0"), Err(MoveError::KingsBlocked));
        let b = board("3k5/9/9/9/9/9/9/9/9/4K4 w - - 0 1");
        assert_eq!(check(&b, "e9d0"), Err(MoveError::KingsNotAligned));
        // An ordinary step out of the palace.
        let b = board("4k4/9/9/9/9/9/9/9/9/5K3 w - - 0 1");
        assert_eq!(check(&b, "f9g9"), Err(MoveError::OutOfPalace));
    }

    #[test]
    fn test_count_obstacles() {
        let b = Board::new();
        let sq = |s: &str| Square::parse(s).unwrap();
        assert_eq!(count_obstacles(&b, sq("a9"), sq("a8")), Some(0));
        assert_eq!(count_obstacles(&b, sq("a9"), sq("a5")), Some(1));
        assert_eq!(count_obstacles(&b, sq("a9"), sq("a0")), Some(2));
        assert_eq!(count_obstacles(&b, sq("a9"), sq("i9")), Some(7));
        assert_eq!(count_obstacles(&b, sq("a9"), sq("b8")), None);
    }
}
