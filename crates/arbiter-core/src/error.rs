//! Error types for notation parsing, rule checking, and coordinate access.

use crate::castle_rights::CastleSide;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Malformed textual input: squares, pieces, FEN fields, or SAN.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A square token is not `-`, a file, a rank, or a file followed by a rank.
    #[error("invalid square: \"{text}\"")]
    InvalidSquare {
        /// The rejected token.
        text: String,
    },
    /// A character is not one of `PNBRQKpnbrqk`.
    #[error("invalid piece character: '{character}'")]
    InvalidPiece {
        /// The rejected character.
        character: char,
    },
    /// The active color field is not "w" or "b".
    #[error("invalid active color: \"{found}\"")]
    InvalidColor {
        /// The rejected field.
        found: String,
    },
    /// The FEN string does not have between 4 and 6 space-separated fields.
    #[error("expected 4 to 6 FEN fields, found {found}")]
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The piece placement section does not have exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank in the piece placement describes more or fewer than 8 squares.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based rank index in FEN order (0 = rank 8).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// The castling field is not a canonical castling string.
    #[error("invalid castling field: \"{found}\"")]
    InvalidCastling {
        /// The rejected field.
        found: String,
    },
    /// The castling field mixes `KQkq` letters with file letters.
    #[error("castling field mixes KQkq and file letters: \"{found}\"")]
    MixedCastlingNotation {
        /// The rejected field.
        found: String,
    },
    /// A castling right is set but its king or rook is not on its home square.
    #[error("{color:?} {side:?} castling right set without king and rook on their home squares")]
    CastlingMismatch {
        /// Side owning the right.
        color: Color,
        /// Which castling right.
        side: CastleSide,
    },
    /// The en passant field is not "-" or a square on rank 3 or 6.
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant {
        /// The rejected field.
        found: String,
    },
    /// A move counter (halfmove clock or fullmove number) is not valid.
    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter {
        /// The field name ("halfmove clock" or "fullmove number").
        field: &'static str,
        /// The rejected value.
        found: String,
    },
    /// A move does not follow the SAN grammar.
    #[error("invalid SAN move: \"{san}\"")]
    InvalidSan {
        /// The rejected move text.
        san: String,
    },
}

/// Well-formed input that breaks the rules of chess.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    /// A promotion suffix was given for a piece other than a pawn.
    #[error("only pawns can promote")]
    PromotionByNonPawn,
    /// A promotion suffix was given for a move that does not reach the last rank.
    #[error("promotion is only possible on the last rank, not on {target}")]
    PromotionOffBackRank {
        /// The move's target square.
        target: Square,
    },
    /// A pawn reaches the last rank without naming its promotion piece.
    #[error("pawn reaching {target} must promote")]
    MissingPromotion {
        /// The move's target square.
        target: Square,
    },
    /// A pawn may not promote to this kind.
    #[error("cannot promote to {kind:?}")]
    InvalidPromotionPiece {
        /// The requested kind.
        kind: PieceKind,
    },
    /// The move is marked as a capture but the target is empty.
    #[error("cannot capture on empty square {square}")]
    CaptureOnEmptySquare {
        /// The move's target square.
        square: Square,
    },
    /// The move is not marked as a capture but the target is occupied.
    #[error("target square {square} is occupied")]
    TargetOccupied {
        /// The move's target square.
        square: Square,
    },
    /// The target holds a piece of the moving side.
    #[error("cannot capture own piece on {square}")]
    CaptureOwnPiece {
        /// The move's target square.
        square: Square,
    },
    /// No piece of the moving side can make this move.
    #[error("no piece can play {san}")]
    NoLegalOrigin {
        /// The move text.
        san: String,
    },
    /// More than one piece of the moving side can make this move.
    #[error("ambiguous move {san}: {candidates} pieces can play it")]
    AmbiguousMove {
        /// The move text.
        san: String,
        /// Number of pieces that could play the move.
        candidates: usize,
    },
    /// The move would leave the moving side's king in check.
    #[error("move leaves the king in check")]
    KingInCheck,
    /// The castling right for this side is not available.
    #[error("{side:?} castling is not available")]
    CastlingUnavailable {
        /// Which castling move.
        side: CastleSide,
    },
    /// Pieces stand between the king, the rook, and their destinations.
    #[error("{side:?} castling is blocked")]
    CastlingBlocked {
        /// Which castling move.
        side: CastleSide,
    },
    /// The king is in check or would pass through or land on an attacked square.
    #[error("{side:?} castling through check")]
    CastlingThroughCheck {
        /// Which castling move.
        side: CastleSide,
    },
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color:?}, found {count}")]
    KingCount {
        /// Which side has the wrong king count.
        color: Color,
        /// Number of kings found.
        count: usize,
    },
    /// The two kings stand on adjacent squares.
    #[error("kings on adjacent squares")]
    AdjacentKings,
}

/// Coordinate access outside the regular squares of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// The operation needs a regular square.
    #[error("{square} is not a regular square")]
    NotRegular {
        /// The offending square.
        square: Square,
    },
    /// The square carries no file.
    #[error("{square} has no file")]
    NoFile {
        /// The offending square.
        square: Square,
    },
    /// The square carries no rank.
    #[error("{square} has no rank")]
    NoRank {
        /// The offending square.
        square: Square,
    },
}

/// Any error raised by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// Malformed input.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// Illegal input.
    #[error(transparent)]
    Rule(#[from] RuleViolation),
    /// Off-board coordinate.
    #[error(transparent)]
    Range(#[from] RangeError),
}

impl ChessError {
    /// Return `true` if this error is a rule violation.
    pub fn is_rule_violation(&self) -> bool {
        matches!(self, ChessError::Rule(_))
    }

    /// Return `true` if this error is a format error.
    pub fn is_format_error(&self) -> bool {
        matches!(self, ChessError::Format(_))
    }
}
