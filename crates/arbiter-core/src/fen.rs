//! FEN and Shredder-FEN parsing and serialization.

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::{ChessError, FormatError};
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse the piece placement field: eight ranks, rank 8 first.
impl FromStr for Board {
    type Err = FormatError;

    fn from_str(placement: &str) -> Result<Board, FormatError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FormatError::WrongRankCount { found: ranks.len() });
        }

        let mut board = Board::empty();
        for (rank_index, rank_str) in ranks.iter().enumerate() {
            // FEN ranks go from 8 to 1 (top to bottom)
            let rank = 7 - rank_index as i32;
            let mut file = 0usize;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(FormatError::InvalidPiece { character: c });
                    }
                    file += digit as usize;
                } else {
                    let piece = Piece::try_from(c)?;
                    if file >= 8 {
                        return Err(FormatError::BadRankLength {
                            rank_index,
                            length: file + 1,
                        });
                    }
                    board.put(Square::new(file as i32, rank), Some(piece));
                    file += 1;
                }
            }

            if file != 8 {
                return Err(FormatError::BadRankLength {
                    rank_index,
                    length: file,
                });
            }
        }
        Ok(board)
    }
}

/// Write the piece placement field.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let mut empty_count = 0u8;

            for file in 0..8 {
                match self.at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}

/// `-` or a square on the third or sixth rank.
pub(crate) fn parse_en_passant(field: &str) -> Result<Square, FormatError> {
    let invalid = || FormatError::InvalidEnPassant {
        found: field.to_string(),
    };
    let sq: Square = field.parse().map_err(|_| invalid())?;
    if sq.is_null() || is_en_passant_square(sq) {
        Ok(sq)
    } else {
        Err(invalid())
    }
}

pub(crate) fn is_en_passant_square(sq: Square) -> bool {
    sq.is_regular() && matches!(sq.rank(), Ok(2 | 5))
}

fn parse_counter(field: &str, name: &'static str) -> Result<u32, FormatError> {
    let invalid = || FormatError::InvalidMoveCounter {
        field: name,
        found: field.to_string(),
    };
    // u32::from_str also takes a leading '+'.
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    field.parse().map_err(|_| invalid())
}

impl FromStr for Position {
    type Err = ChessError;

    /// Parse 4 to 6 whitespace-separated fields; halfmove clock and fullmove
    /// number default to 0 and 1.
    fn from_str(fen: &str) -> Result<Position, ChessError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FormatError::WrongFieldCount {
                found: fields.len(),
            }
            .into());
        }

        let board: Board = fields[0].parse()?;
        let active: Color = fields[1].parse()?;
        let castling = CastleRights::from_fen(fields[2], &board)?;
        let en_passant = parse_en_passant(fields[3])?;

        let halfmove_clock = match fields.get(4) {
            Some(field) => parse_counter(field, "halfmove clock")?,
            None => 0,
        };
        let fullmove_number = match fields.get(5) {
            Some(field) => parse_counter(field, "fullmove number")?,
            None => 1,
        };
        if fullmove_number == 0 {
            return Err(FormatError::InvalidMoveCounter {
                field: "fullmove number",
                found: fields[5].to_string(),
            }
            .into());
        }

        board.validate_kings()?;

        Ok(Position::from_parts(
            board,
            active,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        ))
    }
}

/// Always writes all six fields.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.board(),
            self.active_color(),
            self.castling(),
            self.en_passant(),
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }
}
