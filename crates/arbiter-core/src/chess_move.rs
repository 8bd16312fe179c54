//! One ply in standard algebraic notation (SAN).
//!
//! A [`Move`] is what the text says, not where the piece comes from: the
//! origin is at most a file/rank hint and is resolved against a position by
//! [`Position::apply`](crate::Position::apply).

use std::fmt;
use std::str::FromStr;

use crate::castle_rights::CastleSide;
use crate::error::{ChessError, FormatError, RuleViolation};
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// The `+` or `#` suffix of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckMarker {
    /// `+`
    Check,
    /// `#`
    Mate,
}

impl CheckMarker {
    const fn symbol(self) -> char {
        match self {
            CheckMarker::Check => '+',
            CheckMarker::Mate => '#',
        }
    }
}

/// A parsed SAN move.
///
/// Grammar: `O-O` or `O-O-O`, or
/// `[PNBRQK]? [a-h]? [1-8]? x? <target> (=[NBRQ])?`, either followed by an
/// optional `+`/`#` and up to two `!`/`?` characters. The check marker and
/// the annotation are kept for display only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    piece: PieceKind,
    origin: Square,
    capture: bool,
    target: Square,
    promotion: Option<PieceKind>,
    castling: Option<CastleSide>,
    check: Option<CheckMarker>,
    annotation: String,
}

impl Move {
    /// Castling toward `side`, without decorations.
    pub(crate) fn castle(side: CastleSide) -> Move {
        Move {
            piece: PieceKind::King,
            origin: Square::NULL,
            capture: false,
            target: Square::NULL,
            promotion: None,
            castling: Some(side),
            check: None,
            annotation: String::new(),
        }
    }

    /// A non-castling move, without decorations. Not validated.
    pub(crate) fn standard(
        piece: PieceKind,
        origin: Square,
        capture: bool,
        target: Square,
        promotion: Option<PieceKind>,
    ) -> Move {
        Move {
            piece,
            origin,
            capture,
            target,
            promotion,
            castling: None,
            check: None,
            annotation: String::new(),
        }
    }

    /// Parse SAN text. Same as [`str::parse`].
    pub fn parse(san: &str) -> Result<Move, ChessError> {
        san.parse()
    }

    /// Kind of the moving piece; the king for castling.
    #[inline]
    pub fn piece(&self) -> PieceKind {
        self.piece
    }

    /// Origin hint: null, file-only, rank-only or a full square.
    #[inline]
    pub fn origin(&self) -> Square {
        self.origin
    }

    /// Return `true` if the move is written as a capture.
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture
    }

    /// Target square; null for castling.
    #[inline]
    pub fn target(&self) -> Square {
        self.target
    }

    /// Kind a pawn promotes to, if any.
    #[inline]
    pub fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    /// Castling side; `None` for every other move.
    #[inline]
    pub fn castling(&self) -> Option<CastleSide> {
        self.castling
    }

    /// Return `true` for `O-O` and `O-O-O`.
    #[inline]
    pub fn is_castling(&self) -> bool {
        self.castling.is_some()
    }

    /// The `+`/`#` suffix as written; not verified against the position.
    #[inline]
    pub fn check(&self) -> Option<CheckMarker> {
        self.check
    }

    /// The trailing `!`/`?` characters, possibly empty.
    #[inline]
    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    /// Board-independent promotion rules.
    fn validate(&self) -> Result<(), RuleViolation> {
        let last_rank = matches!(self.target.rank(), Ok(0 | 7));
        match self.promotion {
            Some(_) if self.piece != PieceKind::Pawn => Err(RuleViolation::PromotionByNonPawn),
            Some(kind @ (PieceKind::Pawn | PieceKind::King)) => {
                Err(RuleViolation::InvalidPromotionPiece { kind })
            }
            Some(_) if !last_rank => Err(RuleViolation::PromotionOffBackRank {
                target: self.target,
            }),
            None if self.piece == PieceKind::Pawn && last_rank => {
                Err(RuleViolation::MissingPromotion {
                    target: self.target,
                })
            }
            _ => Ok(()),
        }
    }
}

impl FromStr for Move {
    type Err = ChessError;

    fn from_str(san: &str) -> Result<Move, ChessError> {
        let invalid = || FormatError::InvalidSan {
            san: san.to_string(),
        };
        if !san.is_ascii() {
            return Err(invalid().into());
        }

        let mut body = san.trim_end_matches(['!', '?']);
        let annotation = &san[body.len()..];
        if annotation.len() > 2 {
            return Err(invalid().into());
        }

        let check = match body.as_bytes().last() {
            Some(b'+') => Some(CheckMarker::Check),
            Some(b'#') => Some(CheckMarker::Mate),
            _ => None,
        };
        if check.is_some() {
            body = &body[..body.len() - 1];
        }

        if body.starts_with('O') {
            let side = match body {
                "O-O" => CastleSide::KingSide,
                "O-O-O" => CastleSide::QueenSide,
                _ => return Err(invalid().into()),
            };
            return Ok(Move {
                check,
                annotation: annotation.to_string(),
                ..Move::castle(side)
            });
        }

        let mut rest = body;

        let piece = match rest.chars().next().and_then(PieceKind::from_san_char) {
            Some(kind) => {
                rest = &rest[1..];
                kind
            }
            None => PieceKind::Pawn,
        };

        let mut promotion = None;
        if let Some((head, letter)) = rest.split_once('=') {
            let mut letters = letter.chars();
            promotion = match (letters.next().and_then(PieceKind::from_san_char), letters.next()) {
                (Some(kind), None) => Some(kind),
                _ => return Err(invalid().into()),
            };
            rest = head;
        }

        if rest.len() < 2 {
            return Err(invalid().into());
        }
        let (head, target_text) = rest.split_at(rest.len() - 2);
        let target: Square = target_text.parse().map_err(|_| invalid())?;
        if !target.is_regular() {
            return Err(invalid().into());
        }

        let (head, capture) = match head.strip_suffix('x') {
            Some(head) => (head, true),
            None => (head, false),
        };

        // The origin hint is a file, a rank, both, or nothing; never "-".
        if head.len() > 2 || head == "-" {
            return Err(invalid().into());
        }
        let origin: Square = head.parse().map_err(|_| invalid())?;

        let mv = Move {
            piece,
            origin,
            capture,
            target,
            promotion,
            castling: None,
            check,
            annotation: annotation.to_string(),
        };
        mv.validate()?;
        Ok(mv)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(side) = self.castling {
            f.write_str(side.san())?;
        } else {
            if self.piece != PieceKind::Pawn {
                write!(f, "{}", self.piece)?;
            }
            if !self.origin.is_null() {
                write!(f, "{}", self.origin)?;
            }
            if self.capture {
                f.write_str("x")?;
            }
            write!(f, "{}", self.target)?;
            if let Some(kind) = self.promotion {
                write!(f, "={kind}")?;
            }
        }
        if let Some(check) = self.check {
            write!(f, "{}", check.symbol())?;
        }
        f.write_str(&self.annotation)
    }
}
