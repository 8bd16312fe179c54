//! Knight and king geometry: fixed offsets, no rays.

use crate::square::Square;

/// The eight neighbours of a square.
#[rustfmt::skip]
pub(super) const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// The eight L-shaped jumps.
#[rustfmt::skip]
pub(super) const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

/// Squares a king on `from` defends.
pub(super) fn king_defended(from: Square) -> Vec<Square> {
    jumps(from, &KING_OFFSETS)
}

/// Squares a knight on `from` defends.
pub(super) fn knight_defended(from: Square) -> Vec<Square> {
    jumps(from, &KNIGHT_OFFSETS)
}

fn jumps(from: Square, offsets: &[(i32, i32)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .collect()
}
