//! Chess rules oracle: positions, SAN moves, legality and game status.

mod attacks;
mod board;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod fen;
mod make_move;
mod movegen;
mod perft;
mod piece;
mod piece_kind;
mod position;
mod square;

pub use board::{Board, Preview};
pub use castle_rights::{CastleRights, CastleSide, CastlingNotation};
pub use chess_move::{CheckMarker, Move};
pub use color::Color;
pub use error::{ChessError, FormatError, RangeError, RuleViolation};
pub use fen::STARTING_FEN;
pub use perft::{divide, perft};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use position::Position;
pub use square::Square;
