//! The position aggregate: placement plus side to move, castling rights,
//! en passant target and move counters.

use std::fmt;

use crate::board::{Board, Preview};
use crate::castle_rights::{CastleRights, CastleSide};
use crate::color::Color;
use crate::error::{ChessError, FormatError, RangeError, RuleViolation};
use crate::fen::is_en_passant_square;
use crate::piece::Piece;
use crate::square::Square;

/// A complete chess position.
///
/// Positions change only through [`Position::make_move`] (rules checked) or
/// the `set_*` methods (field format checked, chess legality not). Both
/// leave the position untouched when they fail.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) active: Color,
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Square,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Position {
    /// Return the standard starting position.
    pub fn starting_position() -> Position {
        Position::from_parts(
            Board::starting_position(),
            Color::White,
            CastleRights::STANDARD,
            Square::NULL,
            0,
            1,
        )
    }

    pub(crate) fn from_parts(
        board: Board,
        active: Color,
        castling: CastleRights,
        en_passant: Square,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Position {
        Position {
            board,
            active,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Return the side to move.
    #[inline]
    pub fn active_color(&self) -> Color {
        self.active
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Square a pawn may capture onto en passant; null when there is none.
    #[inline]
    pub fn en_passant(&self) -> Square {
        self.en_passant
    }

    /// Halfmoves since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Starts at 1 and increments after each Black move.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Return the piece on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Result<Option<Piece>, RangeError> {
        self.board.get(sq)
    }

    /// Index of the next halfmove in a game: 1 for White's first move, 2 for
    /// Black's reply, and so on.
    pub fn halfmove_number(&self) -> u32 {
        Position::halfmove_number_of(self.fullmove_number, self.active)
    }

    /// Halfmove index of the move `color` plays at move `fullmove`.
    pub fn halfmove_number_of(fullmove: u32, color: Color) -> u32 {
        match color {
            Color::White => fullmove.saturating_mul(2).saturating_sub(1),
            Color::Black => fullmove.saturating_mul(2),
        }
    }

    /// Replace the whole placement.
    ///
    /// # Errors
    ///
    /// [`FormatError::CastlingMismatch`] if a castling right no longer has
    /// its king and rook at home on `board`.
    pub fn set_board(&mut self, board: Board) -> Result<(), FormatError> {
        self.castling.validate(&board)?;
        self.board = board;
        Ok(())
    }

    /// Place or clear a single square.
    pub fn set_square(&mut self, sq: Square, piece: Option<Piece>) -> Result<(), ChessError> {
        let mut board = self.board;
        board.set(sq, piece)?;
        self.set_board(board)?;
        Ok(())
    }

    pub fn set_active_color(&mut self, color: Color) {
        self.active = color;
    }

    /// Set the en passant target: null, or a square on the third or sixth rank.
    pub fn set_en_passant(&mut self, sq: Square) -> Result<(), FormatError> {
        if !sq.is_null() && !is_en_passant_square(sq) {
            return Err(FormatError::InvalidEnPassant {
                found: sq.to_string(),
            });
        }
        self.en_passant = sq;
        Ok(())
    }

    pub fn set_halfmove_clock(&mut self, halfmove_clock: u32) {
        self.halfmove_clock = halfmove_clock;
    }

    /// Set the fullmove number, which must be at least 1.
    pub fn set_fullmove_number(&mut self, fullmove_number: u32) -> Result<(), FormatError> {
        if fullmove_number == 0 {
            return Err(FormatError::InvalidMoveCounter {
                field: "fullmove number",
                found: fullmove_number.to_string(),
            });
        }
        self.fullmove_number = fullmove_number;
        Ok(())
    }

    /// Grant or revoke one castling right, keeping the recorded home files.
    ///
    /// # Errors
    ///
    /// [`FormatError::CastlingMismatch`] when granting a right whose king and
    /// rook are not at home.
    pub fn set_castling_right(
        &mut self,
        color: Color,
        side: CastleSide,
        available: bool,
    ) -> Result<(), FormatError> {
        let mut castling = self.castling;
        castling.set(color, side, available);
        self.set_castling(castling)
    }

    /// Replace all castling rights.
    pub fn set_castling(&mut self, castling: CastleRights) -> Result<(), FormatError> {
        castling.validate(&self.board)?;
        self.castling = castling;
        Ok(())
    }

    /// Return `true` if the side to move is in check.
    pub fn is_check(&self) -> Result<bool, RuleViolation> {
        self.board.is_in_check(self.active)
    }

    /// Return `true` if the side to move is checkmated.
    pub fn is_mate(&self) -> Result<bool, RuleViolation> {
        Ok(self.is_check()? && self.legal_moves().is_empty())
    }

    /// Return `true` if the side to move has no legal move and is not in check.
    pub fn is_stalemate(&self) -> Result<bool, RuleViolation> {
        Ok(!self.is_check()? && self.legal_moves().is_empty())
    }

    /// Return `true` once a hundred halfmoves passed without capture or pawn move.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Return an ASCII view of the board.
    pub fn preview(&self) -> Preview<'_> {
        self.board.preview()
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::starting_position()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{self}\")")
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::castle_rights::CastleSide;
    use crate::color::Color;
    use crate::error::{ChessError, FormatError, RangeError};
    use crate::fen::STARTING_FEN;
    use crate::piece::Piece;
    use crate::square::Square;

    fn position(fen: &str) -> Position {
        fen.parse().unwrap()
    }

    #[test]
    fn accessors() {
        let pos = Position::default();
        assert_eq!(pos.active_color(), Color::White);
        assert_eq!(pos.en_passant(), Square::NULL);
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
        assert_eq!(pos.piece_at(Square::E1), Ok(Some(Piece::WHITE_KING)));
        assert_eq!(
            pos.piece_at(Square::NULL),
            Err(RangeError::NotRegular { square: Square::NULL })
        );
        assert_eq!(format!("{pos:?}"), format!("Position(\"{STARTING_FEN}\")"));
    }

    #[test]
    fn halfmove_numbers() {
        assert_eq!(Position::default().halfmove_number(), 1);
        let pos = position("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        assert_eq!(pos.halfmove_number(), 2);
        let pos = position("4k3/8/8/8/8/8/8/4K3 w - - 0 30");
        assert_eq!(pos.halfmove_number(), 59);
        assert_eq!(Position::halfmove_number_of(30, Color::Black), 60);
        assert_eq!(Position::halfmove_number_of(1, Color::White), 1);
        assert_eq!(Position::halfmove_number_of(u32::MAX, Color::Black), u32::MAX);
        let pos = position("4k3/8/8/8/8/8/8/4K3 w - - 0 4294967295");
        assert_eq!(pos.halfmove_number(), u32::MAX - 1);
    }

    #[test]
    fn set_square_keeps_castling_consistent() {
        let mut pos = Position::default();
        let before = pos;
        let result = pos.set_square(Square::H1, None);
        assert!(matches!(
            result,
            Err(ChessError::Format(FormatError::CastlingMismatch { .. }))
        ));
        assert_eq!(pos, before);

        pos.set_castling_right(Color::White, CastleSide::KingSide, false).unwrap();
        pos.set_square(Square::H1, None).unwrap();
        assert_eq!(pos.piece_at(Square::H1), Ok(None));
        assert_eq!(pos.castling().to_fen(), "Qkq");
        assert!(pos.set_square(Square::NULL, None).is_err());
    }

    #[test]
    fn set_castling_right_requires_pieces_at_home() {
        let mut pos = position("4k3/8/8/8/8/8/8/4K2R w - - 0 1");
        assert!(pos.set_castling_right(Color::White, CastleSide::QueenSide, true).is_err());
        pos.set_castling_right(Color::White, CastleSide::KingSide, true).unwrap();
        assert_eq!(pos.castling().to_fen(), "K");
    }

    #[test]
    fn field_setters() {
        let mut pos = Position::default();
        pos.set_active_color(Color::Black);
        assert_eq!(pos.active_color(), Color::Black);

        pos.set_en_passant(Square::E3).unwrap();
        assert_eq!(pos.en_passant(), Square::E3);
        assert!(pos.set_en_passant(Square::E4).is_err());
        assert_eq!(pos.en_passant(), Square::E3);
        pos.set_en_passant(Square::NULL).unwrap();

        pos.set_halfmove_clock(12);
        assert_eq!(pos.halfmove_clock(), 12);
        assert!(pos.set_fullmove_number(0).is_err());
        pos.set_fullmove_number(7).unwrap();
        assert_eq!(
            pos.to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 12 7"
        );
    }

    #[test]
    fn fifty_move_rule() {
        let mut pos = position("4k3/8/8/8/8/8/8/4K3 w - - 99 80");
        assert!(!pos.is_fifty_move_draw());
        pos.set_halfmove_clock(100);
        assert!(pos.is_fifty_move_draw());
    }

    #[test]
    fn preview_matches_board() {
        let pos = Position::default();
        assert_eq!(pos.preview().to_string(), pos.board().preview().to_string());
        assert!(pos.preview().to_string().starts_with("rnbqkbnr\npppppppp\n"));
    }
}
