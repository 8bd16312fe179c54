//! Castling rights with per-side king and rook home files.
//!
//! Home files are recorded when the rights are created, so the same code
//! handles the standard setup (king on e, rooks on a and h) and any Chess960
//! arrangement.

use std::fmt;

use crate::board::Board;
use crate::color::Color;
use crate::error::FormatError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// Both sides, king side first.
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// Return the index (0 for king side, 1 for queen side).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            CastleSide::KingSide => 0,
            CastleSide::QueenSide => 1,
        }
    }

    /// File the king lands on (g or c).
    #[inline]
    pub const fn king_destination_file(self) -> u8 {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }

    /// File the rook lands on (f or d).
    #[inline]
    pub const fn rook_destination_file(self) -> u8 {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }

    /// Return the SAN text of this castling move.
    #[inline]
    pub const fn san(self) -> &'static str {
        match self {
            CastleSide::KingSide => "O-O",
            CastleSide::QueenSide => "O-O-O",
        }
    }
}

/// How the castling field is written in FEN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingNotation {
    /// `KQkq`: rooks on the a and h files, king on the e file.
    Standard,
    /// Shredder-FEN: the file letter of each castling rook.
    Shredder,
}

/// Castling availability plus the home files it refers to.
///
/// Availability is a 4-bit field: bit 0 = White king side, 1 = White queen
/// side, 2 = Black king side, 3 = Black queen side.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights {
    bits: u8,
    king_files: [u8; Color::COUNT],
    rook_files: [[u8; 2]; Color::COUNT],
    notation: CastlingNotation,
}

impl CastleRights {
    /// No castling rights, standard home files.
    pub const NONE: CastleRights = CastleRights {
        bits: 0,
        king_files: [4, 4],
        rook_files: [[7, 0], [7, 0]],
        notation: CastlingNotation::Standard,
    };

    /// All four rights of the standard starting position.
    pub const STANDARD: CastleRights = CastleRights {
        bits: 0b1111,
        ..CastleRights::NONE
    };

    #[inline]
    const fn flag(color: Color, side: CastleSide) -> u8 {
        1 << (color.index() * 2 + side.index())
    }

    /// Check whether a specific color and side can castle.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.bits & Self::flag(color, side) != 0
    }

    /// Return `true` if no castling rights remain.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Return the notation style used by [`CastleRights::to_fen`].
    #[inline]
    pub const fn notation(self) -> CastlingNotation {
        self.notation
    }

    /// Grant or revoke a single right. Does not check the board.
    #[inline]
    pub(crate) fn set(&mut self, color: Color, side: CastleSide, available: bool) {
        if available {
            self.bits |= Self::flag(color, side);
        } else {
            self.bits &= !Self::flag(color, side);
        }
    }

    /// Revoke both rights of `color`.
    #[inline]
    pub(crate) fn remove_color(&mut self, color: Color) {
        for side in CastleSide::ALL {
            self.set(color, side, false);
        }
    }

    /// Square the king of `color` must stand on to castle.
    pub fn king_home(self, color: Color) -> Square {
        Square::new(
            i32::from(self.king_files[color.index()]),
            i32::from(color.back_rank()),
        )
    }

    /// Square the castling rook of `color` on `side` must stand on.
    pub fn rook_home(self, color: Color, side: CastleSide) -> Square {
        Square::new(
            i32::from(self.rook_files[color.index()][side.index()]),
            i32::from(color.back_rank()),
        )
    }

    /// Revoke every right whose king or rook home square is `sq`.
    ///
    /// Called with the origin and the target of every move.
    pub(crate) fn revoke_square(&mut self, sq: Square) {
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if sq == self.king_home(color) || sq == self.rook_home(color, side) {
                    self.set(color, side, false);
                }
            }
        }
    }

    /// Check that every granted right has its king and rook at home.
    pub fn validate(&self, board: &Board) -> Result<(), FormatError> {
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if !self.has(color, side) {
                    continue;
                }
                let king = board.at(self.king_home(color));
                let rook = board.at(self.rook_home(color, side));
                if king != Some(Piece::new(PieceKind::King, color))
                    || rook != Some(Piece::new(PieceKind::Rook, color))
                {
                    return Err(FormatError::CastlingMismatch { color, side });
                }
            }
        }
        Ok(())
    }

    /// Parse the FEN castling field against the board it belongs to.
    ///
    /// Accepts `-`, a canonical subsequence of `KQkq`, or Shredder file
    /// letters (White first, king side before queen side). The result is
    /// validated against `board`.
    pub fn from_fen(field: &str, board: &Board) -> Result<CastleRights, FormatError> {
        let invalid = || FormatError::InvalidCastling {
            found: field.to_string(),
        };

        if field == "-" {
            return Ok(CastleRights::NONE);
        }
        if field.is_empty() {
            return Err(invalid());
        }

        let standard = field.chars().all(|c| "KQkq".contains(c));
        let shredder = field.chars().all(|c| matches!(c.to_ascii_lowercase(), 'a'..='h'));
        if !standard && !shredder {
            let known = |c: char| "KQkq".contains(c) || matches!(c.to_ascii_lowercase(), 'a'..='h');
            return Err(if field.chars().all(known) {
                FormatError::MixedCastlingNotation {
                    found: field.to_string(),
                }
            } else {
                invalid()
            });
        }

        let mut rights = CastleRights::NONE;
        if shredder {
            rights.notation = CastlingNotation::Shredder;
        }

        // Rights must appear in strictly increasing (color, side) order.
        let mut last_slot = None;
        for c in field.chars() {
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let side = if standard {
                match c.to_ascii_lowercase() {
                    'k' => CastleSide::KingSide,
                    _ => CastleSide::QueenSide,
                }
            } else {
                let king_file = home_king_file(board, color).ok_or_else(invalid)?;
                let rook_file = c.to_ascii_lowercase() as u8 - b'a';
                let side = match rook_file.cmp(&king_file) {
                    std::cmp::Ordering::Greater => CastleSide::KingSide,
                    std::cmp::Ordering::Less => CastleSide::QueenSide,
                    std::cmp::Ordering::Equal => return Err(invalid()),
                };
                rights.king_files[color.index()] = king_file;
                rights.rook_files[color.index()][side.index()] = rook_file;
                side
            };

            let slot = color.index() * 2 + side.index();
            if last_slot.is_some_and(|last| slot <= last) {
                return Err(invalid());
            }
            last_slot = Some(slot);
            rights.set(color, side, true);
        }

        rights.validate(board)?;
        Ok(rights)
    }

    /// Serialize castling rights to the FEN castling field.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }

        let mut s = String::with_capacity(4);
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if !self.has(color, side) {
                    continue;
                }
                let c = match self.notation {
                    CastlingNotation::Standard => match side {
                        CastleSide::KingSide => 'k',
                        CastleSide::QueenSide => 'q',
                    },
                    CastlingNotation::Shredder => {
                        (b'a' + self.rook_files[color.index()][side.index()]) as char
                    }
                };
                s.push(match color {
                    Color::White => c.to_ascii_uppercase(),
                    Color::Black => c,
                });
            }
        }
        s
    }
}

/// File of the single king of `color` standing on its back rank.
fn home_king_file(board: &Board, color: Color) -> Option<u8> {
    let mut kings = board
        .piece_locations(Piece::new(PieceKind::King, color))
        .into_iter()
        .filter(|sq| sq.rank() == Ok(color.back_rank()));
    match (kings.next(), kings.next()) {
        (Some(king), None) => king.file().ok(),
        _ => None,
    }
}

impl Default for CastleRights {
    fn default() -> Self {
        CastleRights::STANDARD
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({})", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::{CastleRights, CastleSide, CastlingNotation};
    use crate::board::Board;
    use crate::color::Color;
    use crate::error::FormatError;
    use crate::square::Square;

    fn board(placement: &str) -> Board {
        placement.parse().unwrap()
    }

    #[test]
    fn standard_roundtrip() {
        let start = Board::starting_position();
        for fen in ["KQkq", "Kq", "k", "-", "KQ", "kq", "Qk"] {
            let rights = CastleRights::from_fen(fen, &start).unwrap();
            assert_eq!(rights.to_fen(), fen);
            assert_eq!(rights.notation(), CastlingNotation::Standard);
        }
    }

    #[test]
    fn standard_home_squares() {
        let rights = CastleRights::STANDARD;
        assert_eq!(rights.king_home(Color::White), Square::E1);
        assert_eq!(rights.king_home(Color::Black), Square::E8);
        assert_eq!(rights.rook_home(Color::White, CastleSide::KingSide), Square::H1);
        assert_eq!(rights.rook_home(Color::White, CastleSide::QueenSide), Square::A1);
        assert_eq!(rights.rook_home(Color::Black, CastleSide::KingSide), Square::H8);
        assert_eq!(rights.rook_home(Color::Black, CastleSide::QueenSide), Square::A8);
    }

    #[test]
    fn non_canonical_order_rejected() {
        let start = Board::starting_position();
        for fen in ["QK", "kK", "KK", "qk", ""] {
            assert!(CastleRights::from_fen(fen, &start).is_err(), "{fen} should fail");
        }
    }

    #[test]
    fn invalid_letters_rejected() {
        let start = Board::starting_position();
        assert!(matches!(
            CastleRights::from_fen("KQxq", &start),
            Err(FormatError::InvalidCastling { .. })
        ));
        assert!(CastleRights::from_fen("1", &start).is_err());
    }

    #[test]
    fn mixed_notation_rejected() {
        let start = Board::starting_position();
        assert!(matches!(
            CastleRights::from_fen("KAkq", &start),
            Err(FormatError::MixedCastlingNotation { .. })
        ));
    }

    #[test]
    fn shredder_chess960() {
        let b = board("bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR");
        let rights = CastleRights::from_fen("HFhf", &b).unwrap();
        assert_eq!(rights.notation(), CastlingNotation::Shredder);
        assert_eq!(rights.king_home(Color::White), Square::G1);
        assert_eq!(rights.rook_home(Color::White, CastleSide::KingSide), Square::H1);
        assert_eq!(rights.rook_home(Color::White, CastleSide::QueenSide), Square::F1);
        assert_eq!(rights.rook_home(Color::Black, CastleSide::QueenSide), Square::F8);
        assert_eq!(rights.to_fen(), "HFhf");
    }

    #[test]
    fn shredder_standard_files() {
        let start = Board::starting_position();
        let rights = CastleRights::from_fen("HAha", &start).unwrap();
        assert!(rights.has(Color::White, CastleSide::KingSide));
        assert!(rights.has(Color::Black, CastleSide::QueenSide));
        assert_eq!(rights.to_fen(), "HAha");
        assert!(CastleRights::from_fen("AHah", &start).is_err());
    }

    #[test]
    fn mismatch_detected() {
        let b = board("r3k2r/8/8/8/8/8/8/R3K1R1");
        assert_eq!(
            CastleRights::from_fen("KQkq", &b),
            Err(FormatError::CastlingMismatch {
                color: Color::White,
                side: CastleSide::KingSide,
            })
        );
        assert!(CastleRights::from_fen("Qkq", &b).is_ok());
    }

    #[test]
    fn revoke_home_squares() {
        let mut rights = CastleRights::STANDARD;
        rights.revoke_square(Square::H1);
        assert!(!rights.has(Color::White, CastleSide::KingSide));
        assert!(rights.has(Color::White, CastleSide::QueenSide));

        rights.revoke_square(Square::E8);
        assert!(!rights.has(Color::Black, CastleSide::KingSide));
        assert!(!rights.has(Color::Black, CastleSide::QueenSide));
        assert_eq!(rights.to_fen(), "Q");

        rights.revoke_square(Square::D4);
        assert_eq!(rights.to_fen(), "Q");
    }

    #[test]
    fn set_and_remove_color() {
        let mut rights = CastleRights::NONE;
        rights.set(Color::Black, CastleSide::QueenSide, true);
        assert_eq!(rights.to_fen(), "q");
        rights.set(Color::White, CastleSide::KingSide, true);
        assert_eq!(rights.to_fen(), "Kq");
        rights.remove_color(Color::White);
        assert_eq!(rights.to_fen(), "q");
        assert_eq!(format!("{rights:?}"), "CastleRights(q)");
    }
}
