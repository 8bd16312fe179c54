//! Ray casting for bishops, rooks and queens.

use crate::board::Board;
use crate::square::Square;

pub(super) const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub(super) const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Squares a bishop on `from` defends.
pub(super) fn bishop_defended(board: &Board, from: Square) -> Vec<Square> {
    rays(board, from, &BISHOP_DIRECTIONS)
}

/// Squares a rook on `from` defends.
pub(super) fn rook_defended(board: &Board, from: Square) -> Vec<Square> {
    rays(board, from, &ROOK_DIRECTIONS)
}

/// Squares a queen on `from` defends.
pub(super) fn queen_defended(board: &Board, from: Square) -> Vec<Square> {
    let mut squares = rays(board, from, &ROOK_DIRECTIONS);
    squares.extend(rays(board, from, &BISHOP_DIRECTIONS));
    squares
}

/// Walk each direction until the edge, keeping the first occupied square.
fn rays(board: &Board, from: Square, directions: &[(i32, i32)]) -> Vec<Square> {
    let mut squares = Vec::with_capacity(14);
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(next) = current.offset(df, dr) {
            squares.push(next);
            if board.at(next).is_some() {
                break;
            }
            current = next;
        }
    }
    squares
}
