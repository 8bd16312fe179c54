//! Pawn geometry: diagonal threats, pushes and captures.

use crate::board::Board;
use crate::color::Color;
use crate::square::Square;

/// The two forward diagonals of a pawn of `color` on `from`.
pub(super) fn pawn_defended(from: Square, color: Color) -> Vec<Square> {
    let forward = i32::from(color.forward());
    [-1, 1]
        .into_iter()
        .filter_map(|df| from.offset(df, forward))
        .collect()
}

/// Pushes onto empty squares plus diagonal captures of enemy pieces or of
/// the en passant target.
pub(super) fn pawn_reachable(
    board: &Board,
    from: Square,
    color: Color,
    en_passant: Square,
) -> Vec<Square> {
    let forward = i32::from(color.forward());
    let mut squares = Vec::with_capacity(4);

    if let Some(single) = from.offset(0, forward).filter(|&sq| board.at(sq).is_none()) {
        squares.push(single);
        if from.rank() == Ok(color.pawn_rank()) {
            if let Some(double) = single.offset(0, forward).filter(|&sq| board.at(sq).is_none()) {
                squares.push(double);
            }
        }
    }

    for target in pawn_defended(from, color) {
        let enemy = board.at(target).is_some_and(|p| p.color() != color);
        if enemy || (target == en_passant && board.at(target).is_none()) {
            squares.push(target);
        }
    }
    squares
}
