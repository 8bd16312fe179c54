//! Piece placement: one optional piece per square.

use std::fmt;

use crate::color::Color;
use crate::error::{RangeError, RuleViolation};
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement on the 64 regular squares.
///
/// The board enforces nothing beyond one piece per square; king counts and
/// castling homes are checked by [`Position`](crate::Position). Copying a
/// board is a plain 64-element copy, which is how speculative moves are tried.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Return a board without pieces.
    pub const fn empty() -> Board {
        Board {
            squares: [None; Square::COUNT],
        }
    }

    /// Return the standard starting placement.
    pub fn starting_position() -> Board {
        let mut board = Board::empty();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            board.squares[file] = Some(Piece::new(kind, Color::White));
            board.squares[8 + file] = Some(Piece::WHITE_PAWN);
            board.squares[48 + file] = Some(Piece::BLACK_PAWN);
            board.squares[56 + file] = Some(Piece::new(kind, Color::Black));
        }
        board
    }

    /// Return the piece on `sq`, if any.
    ///
    /// # Errors
    ///
    /// [`RangeError::NotRegular`] if `sq` is not a regular square.
    pub fn get(&self, sq: Square) -> Result<Option<Piece>, RangeError> {
        Ok(self.squares[sq.checked_index()?])
    }

    /// Place `piece` on `sq`, or clear it with `None`.
    ///
    /// # Errors
    ///
    /// [`RangeError::NotRegular`] if `sq` is not a regular square.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Result<(), RangeError> {
        self.squares[sq.checked_index()?] = piece;
        Ok(())
    }

    /// Return `true` if no piece stands on `sq`.
    pub fn is_vacant(&self, sq: Square) -> Result<bool, RangeError> {
        Ok(self.get(sq)?.is_none())
    }

    /// Piece on `sq`; `None` for empty and for non-regular squares.
    #[inline]
    pub(crate) fn at(&self, sq: Square) -> Option<Piece> {
        sq.index().and_then(|i| self.squares[i])
    }

    /// Place or clear a piece; non-regular squares are ignored.
    #[inline]
    pub(crate) fn put(&mut self, sq: Square, piece: Option<Piece>) {
        if let Some(i) = sq.index() {
            self.squares[i] = piece;
        }
    }

    /// Return every square holding exactly `piece`, in index order.
    pub fn piece_locations(&self, piece: Piece) -> Vec<Square> {
        Square::all()
            .filter(|&sq| self.at(sq) == Some(piece))
            .collect()
    }

    /// Return the square of the king of `color`.
    ///
    /// # Errors
    ///
    /// [`RuleViolation::KingCount`] unless exactly one such king is on the board.
    pub fn king_square(&self, color: Color) -> Result<Square, RuleViolation> {
        let kings = self.piece_locations(Piece::new(PieceKind::King, color));
        match kings.as_slice() {
            [king] => Ok(*king),
            _ => Err(RuleViolation::KingCount {
                color,
                count: kings.len(),
            }),
        }
    }

    /// Check that each side has one king and the kings are not adjacent.
    pub fn validate_kings(&self) -> Result<(), RuleViolation> {
        let white = self.king_square(Color::White)?;
        let black = self.king_square(Color::Black)?;
        if are_adjacent(white, black) {
            return Err(RuleViolation::AdjacentKings);
        }
        Ok(())
    }

    /// Return an ASCII view of the board, rank 8 first, `.` for empty squares.
    pub fn preview(&self) -> Preview<'_> {
        Preview(self)
    }
}

fn are_adjacent(a: Square, b: Square) -> bool {
    match (a.file(), a.rank(), b.file(), b.rank()) {
        (Ok(af), Ok(ar), Ok(bf), Ok(br)) => af.abs_diff(bf) <= 1 && ar.abs_diff(br) <= 1,
        _ => false,
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{self}\")")
    }
}

/// ASCII grid of a board: eight lines of eight characters.
pub struct Preview<'a>(&'a Board);

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let c = self
                    .0
                    .at(Square::new(file, rank))
                    .map_or('.', Piece::fen_char);
                write!(f, "{c}")?;
            }
            if rank > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::color::Color;
    use crate::error::{RangeError, RuleViolation};
    use crate::piece::Piece;
    use crate::square::Square;

    #[test]
    fn starting_position_pieces() {
        let board = Board::starting_position();
        assert_eq!(board.get(Square::E1), Ok(Some(Piece::WHITE_KING)));
        assert_eq!(board.get(Square::D1), Ok(Some(Piece::WHITE_QUEEN)));
        assert_eq!(board.get(Square::A8), Ok(Some(Piece::BLACK_ROOK)));
        assert_eq!(board.get(Square::G8), Ok(Some(Piece::BLACK_KNIGHT)));
        assert_eq!(board.get(Square::E2), Ok(Some(Piece::WHITE_PAWN)));
        assert_eq!(board.get(Square::E4), Ok(None));
    }

    #[test]
    fn get_set_require_regular_squares() {
        let mut board = Board::empty();
        let file: Square = "e".parse().unwrap();
        assert_eq!(board.get(file), Err(RangeError::NotRegular { square: file }));
        assert!(board.set(Square::NULL, Some(Piece::WHITE_KING)).is_err());

        board.set(Square::C5, Some(Piece::WHITE_ROOK)).unwrap();
        assert_eq!(board.get(Square::C5), Ok(Some(Piece::WHITE_ROOK)));
        assert_eq!(board.is_vacant(Square::C5), Ok(false));
        board.set(Square::C5, None).unwrap();
        assert_eq!(board.is_vacant(Square::C5), Ok(true));
    }

    #[test]
    fn piece_locations() {
        let board = Board::starting_position();
        assert_eq!(
            board.piece_locations(Piece::WHITE_KNIGHT),
            vec![Square::B1, Square::G1]
        );
        assert_eq!(board.piece_locations(Piece::BLACK_PAWN).len(), 8);
        assert!(Board::empty().piece_locations(Piece::WHITE_KING).is_empty());
    }

    #[test]
    fn king_square() {
        let board = Board::starting_position();
        assert_eq!(board.king_square(Color::White), Ok(Square::E1));
        assert_eq!(board.king_square(Color::Black), Ok(Square::E8));
        assert_eq!(
            Board::empty().king_square(Color::White),
            Err(RuleViolation::KingCount {
                color: Color::White,
                count: 0,
            })
        );
    }

    #[test]
    fn validate_kings() {
        assert!(Board::starting_position().validate_kings().is_ok());

        let adjacent: Board = "8/8/8/3kK3/8/8/8/8".parse().unwrap();
        assert_eq!(adjacent.validate_kings(), Err(RuleViolation::AdjacentKings));

        let two: Board = "k7/8/8/8/8/8/8/K6K".parse().unwrap();
        assert_eq!(
            two.validate_kings(),
            Err(RuleViolation::KingCount {
                color: Color::White,
                count: 2,
            })
        );
    }

    #[test]
    fn preview_grid() {
        let preview = Board::starting_position().preview().to_string();
        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "rnbqkbnr");
        assert_eq!(lines[1], "pppppppp");
        assert_eq!(lines[4], "........");
        assert_eq!(lines[7], "RNBQKBNR");
    }

    #[test]
    fn copies_are_independent() {
        let original = Board::starting_position();
        let mut copy = original;
        copy.set(Square::E2, None).unwrap();
        assert_eq!(original.get(Square::E2), Ok(Some(Piece::WHITE_PAWN)));
        assert_eq!(copy.get(Square::E2), Ok(None));
    }
}
