//! Board coordinates, including partial (file-only, rank-only) and null squares.

use std::fmt;
use std::str::FromStr;

use crate::error::{FormatError, RangeError};

/// A coordinate on the board with an optional file and an optional rank.
///
/// - regular square: both present (`e4`)
/// - file: only the file (`e`)
/// - rank: only the rank (`4`)
/// - null square: neither (`-`)
///
/// Indices are zero-based: file `a` = 0, rank `1` = 0. Constructing a square
/// from an out-of-range index yields [`Square::NULL`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Square {
    file: Option<u8>,
    rank: Option<u8>,
}

impl Square {
    /// Total number of regular squares.
    pub const COUNT: usize = 64;

    /// The null square: no file, no rank.
    pub const NULL: Square = Square {
        file: None,
        rank: None,
    };

    const fn at(file: u8, rank: u8) -> Square {
        Square {
            file: Some(file),
            rank: Some(rank),
        }
    }

    fn checked(index: i32) -> Option<u8> {
        u8::try_from(index).ok().filter(|&i| i < 8)
    }

    /// Create a regular square, or the null square if either index is off the board.
    pub fn new(file: i32, rank: i32) -> Square {
        match (Self::checked(file), Self::checked(rank)) {
            (Some(file), Some(rank)) => Square::at(file, rank),
            _ => Square::NULL,
        }
    }

    /// Create a file-only square, or the null square if `file` is off the board.
    pub fn file_only(file: i32) -> Square {
        Square {
            file: Self::checked(file),
            rank: None,
        }
    }

    /// Create a rank-only square, or the null square if `rank` is off the board.
    pub fn rank_only(rank: i32) -> Square {
        Square {
            file: None,
            rank: Self::checked(rank),
        }
    }

    /// Create a regular square from a zero-based index (a1 = 0, h8 = 63).
    pub(crate) fn from_index(index: usize) -> Option<Square> {
        if index < Self::COUNT {
            Some(Square::at((index % 8) as u8, (index / 8) as u8))
        } else {
            None
        }
    }

    /// Return the zero-based index (a1 = 0, h8 = 63) of a regular square.
    #[inline]
    pub(crate) fn index(self) -> Option<usize> {
        match (self.file, self.rank) {
            (Some(file), Some(rank)) => Some(rank as usize * 8 + file as usize),
            _ => None,
        }
    }

    /// Return the index of a regular square, or [`RangeError::NotRegular`].
    #[inline]
    pub(crate) fn checked_index(self) -> Result<usize, RangeError> {
        self.index().ok_or(RangeError::NotRegular { square: self })
    }

    /// Return the file index (0..7).
    pub fn file(self) -> Result<u8, RangeError> {
        self.file.ok_or(RangeError::NoFile { square: self })
    }

    /// Return the rank index (0..7).
    pub fn rank(self) -> Result<u8, RangeError> {
        self.rank.ok_or(RangeError::NoRank { square: self })
    }

    /// Return the square `d_file` files east and `d_rank` ranks north of this one.
    ///
    /// The result is the null square when it falls off the board.
    ///
    /// # Errors
    ///
    /// [`RangeError::NotRegular`] if this square is not regular.
    pub fn relative(self, d_file: i32, d_rank: i32) -> Result<Square, RangeError> {
        match (self.file, self.rank) {
            (Some(file), Some(rank)) => Ok(Square::new(
                i32::from(file) + d_file,
                i32::from(rank) + d_rank,
            )),
            _ => Err(RangeError::NotRegular { square: self }),
        }
    }

    /// Like [`Square::relative`], but `None` for non-regular inputs and off-board results.
    #[inline]
    pub(crate) fn offset(self, d_file: i32, d_rank: i32) -> Option<Square> {
        self.relative(d_file, d_rank)
            .ok()
            .filter(|sq| sq.is_regular())
    }

    /// Return `true` for the null square.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.file.is_none() && self.rank.is_none()
    }

    /// Return `true` for a file-only square.
    #[inline]
    pub const fn is_file(self) -> bool {
        self.file.is_some() && self.rank.is_none()
    }

    /// Return `true` for a rank-only square.
    #[inline]
    pub const fn is_rank(self) -> bool {
        self.file.is_none() && self.rank.is_some()
    }

    /// Return `true` for a square with both file and rank.
    #[inline]
    pub const fn is_regular(self) -> bool {
        self.file.is_some() && self.rank.is_some()
    }

    /// Return `true` if the square carries a file (regular or file-only).
    #[inline]
    pub const fn has_file(self) -> bool {
        self.file.is_some()
    }

    /// Return `true` if the square carries a rank (regular or rank-only).
    #[inline]
    pub const fn has_rank(self) -> bool {
        self.rank.is_some()
    }

    /// Keep only the file.
    #[inline]
    pub(crate) const fn without_rank(self) -> Square {
        Square {
            file: self.file,
            rank: None,
        }
    }

    /// Keep only the rank.
    #[inline]
    pub(crate) const fn without_file(self) -> Square {
        Square {
            file: None,
            rank: self.rank,
        }
    }

    /// Return `true` if `self` agrees with every coordinate present in `hint`.
    pub(crate) fn matches(self, hint: Square) -> bool {
        hint.file.is_none_or(|f| self.file == Some(f))
            && hint.rank.is_none_or(|r| self.rank == Some(r))
    }

    /// Iterate over all 64 regular squares in index order (a1, b1, ..., h8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::COUNT).filter_map(Square::from_index)
    }

    // Named regular squares, a1 through h8.
    pub const A1: Square = Square::at(0, 0);
    pub const B1: Square = Square::at(1, 0);
    pub const C1: Square = Square::at(2, 0);
    pub const D1: Square = Square::at(3, 0);
    pub const E1: Square = Square::at(4, 0);
    pub const F1: Square = Square::at(5, 0);
    pub const G1: Square = Square::at(6, 0);
    pub const H1: Square = Square::at(7, 0);
    pub const A2: Square = Square::at(0, 1);
    pub const B2: Square = Square::at(1, 1);
    pub const C2: Square = Square::at(2, 1);
    pub const D2: Square = Square::at(3, 1);
    pub const E2: Square = Square::at(4, 1);
    pub const F2: Square = Square::at(5, 1);
    pub const G2: Square = Square::at(6, 1);
    pub const H2: Square = Square::at(7, 1);
    pub const A3: Square = Square::at(0, 2);
    pub const B3: Square = Square::at(1, 2);
    pub const C3: Square = Square::at(2, 2);
    pub const D3: Square = Square::at(3, 2);
    pub const E3: Square = Square::at(4, 2);
    pub const F3: Square = Square::at(5, 2);
    pub const G3: Square = Square::at(6, 2);
    pub const H3: Square = Square::at(7, 2);
    pub const A4: Square = Square::at(0, 3);
    pub const B4: Square = Square::at(1, 3);
    pub const C4: Square = Square::at(2, 3);
    pub const D4: Square = Square::at(3, 3);
    pub const E4: Square = Square::at(4, 3);
    pub const F4: Square = Square::at(5, 3);
    pub const G4: Square = Square::at(6, 3);
    pub const H4: Square = Square::at(7, 3);
    pub const A5: Square = Square::at(0, 4);
    pub const B5: Square = Square::at(1, 4);
    pub const C5: Square = Square::at(2, 4);
    pub const D5: Square = Square::at(3, 4);
    pub const E5: Square = Square::at(4, 4);
    pub const F5: Square = Square::at(5, 4);
    pub const G5: Square = Square::at(6, 4);
    pub const H5: Square = Square::at(7, 4);
    pub const A6: Square = Square::at(0, 5);
    pub const B6: Square = Square::at(1, 5);
    pub const C6: Square = Square::at(2, 5);
    pub const D6: Square = Square::at(3, 5);
    pub const E6: Square = Square::at(4, 5);
    pub const F6: Square = Square::at(5, 5);
    pub const G6: Square = Square::at(6, 5);
    pub const H6: Square = Square::at(7, 5);
    pub const A7: Square = Square::at(0, 6);
    pub const B7: Square = Square::at(1, 6);
    pub const C7: Square = Square::at(2, 6);
    pub const D7: Square = Square::at(3, 6);
    pub const E7: Square = Square::at(4, 6);
    pub const F7: Square = Square::at(5, 6);
    pub const G7: Square = Square::at(6, 6);
    pub const H7: Square = Square::at(7, 6);
    pub const A8: Square = Square::at(0, 7);
    pub const B8: Square = Square::at(1, 7);
    pub const C8: Square = Square::at(2, 7);
    pub const D8: Square = Square::at(3, 7);
    pub const E8: Square = Square::at(4, 7);
    pub const F8: Square = Square::at(5, 7);
    pub const G8: Square = Square::at(6, 7);
    pub const H8: Square = Square::at(7, 7);
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "-");
        }
        if let Some(file) = self.file {
            write!(f, "{}", (b'a' + file) as char)?;
        }
        if let Some(rank) = self.rank {
            write!(f, "{}", rank + 1)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}

impl FromStr for Square {
    type Err = FormatError;

    /// Parse `e4`, `e`, `4`, or `-` (the empty string also yields the null square).
    fn from_str(s: &str) -> Result<Square, FormatError> {
        if s.is_empty() || s == "-" {
            return Ok(Square::NULL);
        }

        let invalid = || FormatError::InvalidSquare {
            text: s.to_string(),
        };
        let mut bytes = s.bytes().peekable();
        let mut square = Square::NULL;

        if let Some(b) = bytes.next_if(|b| (b'a'..=b'h').contains(b)) {
            square.file = Some(b - b'a');
        }
        if let Some(b) = bytes.next_if(|b| (b'1'..=b'8').contains(b)) {
            square.rank = Some(b - b'1');
        }
        if bytes.next().is_some() || square.is_null() {
            return Err(invalid());
        }
        Ok(square)
    }
}
