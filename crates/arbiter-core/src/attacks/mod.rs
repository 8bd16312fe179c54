//! Piece geometry: defended and reachable squares, attack and check queries.
//!
//! Each piece kind has its own function; [`defended`] and [`reachable`]
//! dispatch on the kind. Squares passed in here are regular.

mod leapers;
mod pawns;
mod sliders;

use crate::board::Board;
use crate::color::Color;
use crate::error::{RangeError, RuleViolation};
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use self::leapers::{king_defended, knight_defended};
use self::pawns::{pawn_defended, pawn_reachable};
use self::sliders::{bishop_defended, queen_defended, rook_defended};

/// Squares `piece` standing on `from` threatens, whatever their occupant.
pub(crate) fn defended(board: &Board, from: Square, piece: Piece) -> Vec<Square> {
    match piece.kind() {
        PieceKind::Pawn => pawn_defended(from, piece.color()),
        PieceKind::Knight => knight_defended(from),
        PieceKind::Bishop => bishop_defended(board, from),
        PieceKind::Rook => rook_defended(board, from),
        PieceKind::Queen => queen_defended(board, from),
        PieceKind::King => king_defended(from),
    }
}

/// Pseudo-legal destinations of `piece` standing on `from`.
pub(crate) fn reachable(
    board: &Board,
    from: Square,
    piece: Piece,
    en_passant: Square,
) -> Vec<Square> {
    match piece.kind() {
        PieceKind::Pawn => pawn_reachable(board, from, piece.color(), en_passant),
        _ => defended(board, from, piece)
            .into_iter()
            .filter(|&sq| board.at(sq).is_none_or(|p| p.color() != piece.color()))
            .collect(),
    }
}

impl Board {
    /// Return the squares `piece` would threaten from `sq`.
    ///
    /// Sliding rays stop after the first occupied square, which is included
    /// whatever its color. Pawns threaten their two forward diagonals only.
    ///
    /// # Errors
    ///
    /// [`RangeError::NotRegular`] if `sq` is not a regular square.
    pub fn defended_squares(&self, sq: Square, piece: Piece) -> Result<Vec<Square>, RangeError> {
        sq.checked_index()?;
        Ok(defended(self, sq, piece))
    }

    /// Return the pseudo-legal destinations of `piece` from `sq`.
    ///
    /// Friendly-occupied squares are excluded. Pawns push onto empty squares
    /// and move diagonally only onto enemy pieces or the `en_passant` target
    /// (pass [`Square::NULL`] for none). Whether the mover's king is left in
    /// check is not considered.
    ///
    /// # Errors
    ///
    /// [`RangeError::NotRegular`] if `sq` is not a regular square.
    pub fn reachable_squares(
        &self,
        sq: Square,
        piece: Piece,
        en_passant: Square,
    ) -> Result<Vec<Square>, RangeError> {
        sq.checked_index()?;
        Ok(reachable(self, sq, piece, en_passant))
    }

    /// Return `true` if any piece of `by` threatens `sq`.
    ///
    /// # Errors
    ///
    /// [`RangeError::NotRegular`] if `sq` is not a regular square.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> Result<bool, RangeError> {
        sq.checked_index()?;
        Ok(self.attacked(sq, by))
    }

    pub(crate) fn attacked(&self, sq: Square, by: Color) -> bool {
        PieceKind::ALL
            .into_iter()
            .any(|kind| self.is_attacked_by(sq, Piece::new(kind, by)))
    }

    /// Return `true` if some `attacker` threatens `sq`.
    ///
    /// Casts the shadow of the attacker outward from `sq`: the same geometry
    /// with the color flipped, so a white pawn is looked for south of `sq`.
    pub(crate) fn is_attacked_by(&self, sq: Square, attacker: Piece) -> bool {
        defended(self, sq, attacker.flipped())
            .into_iter()
            .any(|from| self.at(from) == Some(attacker))
    }

    /// Return `true` if the king of `color` is attacked.
    ///
    /// # Errors
    ///
    /// [`RuleViolation::KingCount`] unless each side has exactly one king,
    /// [`RuleViolation::AdjacentKings`] if the kings touch.
    pub fn is_in_check(&self, color: Color) -> Result<bool, RuleViolation> {
        self.validate_kings()?;
        let king = self.king_square(color)?;
        Ok(self.attacked(king, color.flip()))
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::color::Color;
    use crate::error::{RangeError, RuleViolation};
    use crate::piece::Piece;
    use crate::square::Square;

    #[test]
    fn defended_includes_friendly_pieces() {
        let board = Board::starting_position();
        let squares = board.defended_squares(Square::B1, Piece::WHITE_KNIGHT).unwrap();
        assert_eq!(squares.len(), 3);
        assert!(squares.contains(&Square::D2));
    }

    #[test]
    fn reachable_excludes_friendly_pieces() {
        let board = Board::starting_position();
        let mut squares = board
            .reachable_squares(Square::B1, Piece::WHITE_KNIGHT, Square::NULL)
            .unwrap();
        squares.sort_by_key(|sq| sq.to_string());
        assert_eq!(squares, vec![Square::A3, Square::C3]);
        assert!(board
            .reachable_squares(Square::D1, Piece::WHITE_QUEEN, Square::NULL)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn reachable_includes_enemy_blocker() {
        let board: Board = "8/8/4p3/8/4R3/8/8/8".parse().unwrap();
        let squares = board
            .reachable_squares(Square::E4, Piece::WHITE_ROOK, Square::NULL)
            .unwrap();
        assert!(squares.contains(&Square::E6));
        assert!(!squares.contains(&Square::E7));
        assert_eq!(squares.len(), 12);
    }

    #[test]
    fn geometry_requires_regular_square() {
        let board = Board::empty();
        let file: Square = "e".parse().unwrap();
        assert_eq!(
            board.defended_squares(file, Piece::WHITE_ROOK),
            Err(RangeError::NotRegular { square: file })
        );
        assert!(board.reachable_squares(Square::NULL, Piece::WHITE_PAWN, Square::NULL).is_err());
        assert!(board.is_square_attacked(Square::NULL, Color::White).is_err());
    }

    #[test]
    fn pawn_attacks_by_color() {
        let board: Board = "8/8/8/3p4/8/8/4P3/8".parse().unwrap();
        // White pawn on e2 covers d3 and f3, never e3 or anything behind it.
        assert_eq!(board.is_square_attacked(Square::D3, Color::White), Ok(true));
        assert_eq!(board.is_square_attacked(Square::F3, Color::White), Ok(true));
        assert_eq!(board.is_square_attacked(Square::E3, Color::White), Ok(false));
        assert_eq!(board.is_square_attacked(Square::D1, Color::White), Ok(false));
        // Black pawn on d5 covers c4 and e4, never c6 or e6.
        assert_eq!(board.is_square_attacked(Square::C4, Color::Black), Ok(true));
        assert_eq!(board.is_square_attacked(Square::E4, Color::Black), Ok(true));
        assert_eq!(board.is_square_attacked(Square::C6, Color::Black), Ok(false));
        assert_eq!(board.is_square_attacked(Square::E6, Color::Black), Ok(false));
    }

    #[test]
    fn slider_attacks_are_blocked() {
        let board: Board = "8/8/8/8/8/8/4P3/4R3".parse().unwrap();
        assert_eq!(board.is_square_attacked(Square::E2, Color::White), Ok(true));
        assert_eq!(board.is_square_attacked(Square::F3, Color::White), Ok(true));
        assert_eq!(board.is_square_attacked(Square::E3, Color::White), Ok(false));
        assert_eq!(board.is_square_attacked(Square::A1, Color::White), Ok(true));
        assert_eq!(board.is_square_attacked(Square::A1, Color::Black), Ok(false));
    }

    #[test]
    fn check_detection() {
        let board: Board = "4k3/8/8/8/8/8/8/4K2r".parse().unwrap();
        assert_eq!(board.is_in_check(Color::White), Ok(true));
        assert_eq!(board.is_in_check(Color::Black), Ok(false));
        assert_eq!(Board::starting_position().is_in_check(Color::White), Ok(false));
    }

    #[test]
    fn check_requires_sane_kings() {
        let board: Board = "8/8/8/8/8/8/8/4K3".parse().unwrap();
        assert_eq!(
            board.is_in_check(Color::White),
            Err(RuleViolation::KingCount {
                color: Color::Black,
                count: 0,
            })
        );
        let board: Board = "8/8/8/8/8/8/4k3/4K3".parse().unwrap();
        assert_eq!(board.is_in_check(Color::White), Err(RuleViolation::AdjacentKings));
    }
}
