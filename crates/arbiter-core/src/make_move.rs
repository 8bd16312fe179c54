//! Move execution via copy-make.
//!
//! Every move is played on a copy of the position; the copy replaces the
//! original only when the whole move, bookkeeping included, succeeded.

use tracing::{debug, trace};

use crate::attacks::defended;
use crate::board::Board;
use crate::castle_rights::CastleSide;
use crate::chess_move::Move;
use crate::color::Color;
use crate::error::{ChessError, RuleViolation};
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// The board after a resolved standard move, plus what bookkeeping needs.
struct Resolved {
    board: Board,
    origin: Square,
    is_capture: bool,
}

impl Position {
    /// Play a SAN move, updating the position.
    ///
    /// On error the position is unchanged.
    pub fn make_move(&mut self, san: &str) -> Result<(), ChessError> {
        match self.try_move(san) {
            Ok(next) => {
                *self = next;
                debug!(san, fen = %self, "move applied");
                Ok(())
            }
            Err(err) => {
                trace!(san, error = %err, "move rejected");
                Err(err)
            }
        }
    }

    /// Return the position after the SAN move, leaving `self` untouched.
    pub fn try_move(&self, san: &str) -> Result<Position, ChessError> {
        let mv: Move = san.parse()?;
        Ok(self.apply(&mv)?)
    }

    /// Return `true` if the SAN move can be played here.
    pub fn is_legal_move(&self, san: &str) -> bool {
        self.try_move(san).is_ok()
    }

    /// Return the position after a parsed move.
    pub fn apply(&self, mv: &Move) -> Result<Position, RuleViolation> {
        let mut next = *self;
        match mv.castling() {
            Some(side) => {
                next.board = self.castled_board(side)?;
                next.castling.remove_color(self.active);
                next.en_passant = Square::NULL;
                next.halfmove_clock = self.halfmove_clock.saturating_add(1);
            }
            None => {
                let resolved = self.resolve(mv)?;
                let pawn = mv.piece() == PieceKind::Pawn;
                let target = mv.target();

                next.board = resolved.board;
                next.halfmove_clock = if pawn || resolved.is_capture {
                    0
                } else {
                    self.halfmove_clock.saturating_add(1)
                };
                next.en_passant = match (resolved.origin.rank(), target.rank()) {
                    (Ok(from), Ok(to)) if pawn && from.abs_diff(to) == 2 => resolved
                        .origin
                        .offset(0, i32::from(self.active.forward()))
                        .unwrap_or(Square::NULL),
                    _ => Square::NULL,
                };
                next.castling.revoke_square(resolved.origin);
                next.castling.revoke_square(target);
            }
        }

        if self.active == Color::Black {
            next.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        next.active = self.active.flip();

        debug_assert!(
            next.castling.validate(&next.board).is_ok(),
            "castling rights out of sync with the board"
        );
        Ok(next)
    }

    /// Board after castling toward `side`, or why it is not allowed.
    fn castled_board(&self, side: CastleSide) -> Result<Board, RuleViolation> {
        let color = self.active;
        let king = Piece::new(PieceKind::King, color);
        let rook = Piece::new(PieceKind::Rook, color);
        let king_from = self.castling.king_home(color);
        let rook_from = self.castling.rook_home(color, side);

        if !self.castling.has(color, side)
            || self.board.at(king_from) != Some(king)
            || self.board.at(rook_from) != Some(rook)
        {
            return Err(RuleViolation::CastlingUnavailable { side });
        }

        let rank = i32::from(color.back_rank());
        let king_to = Square::new(i32::from(side.king_destination_file()), rank);
        let rook_to = Square::new(i32::from(side.rook_destination_file()), rank);

        // Only the castling king and rook may stand on the squares either
        // piece crosses or lands on.
        let blocked = span(king_from, king_to)
            .chain(span(rook_from, rook_to))
            .any(|sq| sq != king_from && sq != rook_from && self.board.at(sq).is_some());
        if blocked {
            return Err(RuleViolation::CastlingBlocked { side });
        }

        let opponent = color.flip();
        if span(king_from, king_to).any(|sq| self.board.attacked(sq, opponent)) {
            return Err(RuleViolation::CastlingThroughCheck { side });
        }

        let mut board = self.board;
        board.put(king_from, None);
        board.put(rook_from, None);
        board.put(king_to, Some(king));
        board.put(rook_to, Some(rook));

        if !king_is_safe(&board, color)? {
            return Err(RuleViolation::CastlingThroughCheck { side });
        }
        Ok(board)
    }

    /// Find the single origin of a standard move and play it on a board copy.
    fn resolve(&self, mv: &Move) -> Result<Resolved, RuleViolation> {
        let color = self.active;
        let mover = Piece::new(mv.piece(), color);
        let target = mv.target();
        let occupant = self.board.at(target);
        let en_passant = mv.piece() == PieceKind::Pawn
            && mv.is_capture()
            && occupant.is_none()
            && target == self.en_passant;

        match occupant {
            None if mv.is_capture() && !en_passant => {
                return Err(RuleViolation::CaptureOnEmptySquare { square: target });
            }
            Some(_) if !mv.is_capture() => {
                return Err(RuleViolation::TargetOccupied { square: target });
            }
            Some(piece) if piece.color() == color => {
                return Err(RuleViolation::CaptureOwnPiece { square: target });
            }
            _ => {}
        }

        let candidates: Vec<Square> = self
            .origin_candidates(mv, mover)
            .into_iter()
            .filter(|&sq| self.board.at(sq) == Some(mover) && sq.matches(mv.origin()))
            .collect();

        let placed = mv.promotion().map_or(mover, |kind| Piece::new(kind, color));
        let mut safe = Vec::with_capacity(1);
        for &origin in &candidates {
            let mut board = self.board;
            board.put(origin, None);
            board.put(target, Some(placed));
            if en_passant {
                if let Some(captured) = target.offset(0, -i32::from(color.forward())) {
                    board.put(captured, None);
                }
            }
            if king_is_safe(&board, color)? {
                safe.push((origin, board));
            }
        }

        match safe.as_slice() {
            [(origin, board)] => Ok(Resolved {
                board: *board,
                origin: *origin,
                is_capture: mv.is_capture(),
            }),
            [] if candidates.is_empty() => Err(RuleViolation::NoLegalOrigin {
                san: mv.to_string(),
            }),
            [] => Err(RuleViolation::KingInCheck),
            _ => Err(RuleViolation::AmbiguousMove {
                san: mv.to_string(),
                candidates: safe.len(),
            }),
        }
    }

    /// Squares the moving piece could have come from, ignoring occupancy of
    /// the squares themselves.
    fn origin_candidates(&self, mv: &Move, mover: Piece) -> Vec<Square> {
        let target = mv.target();
        if mv.piece() != PieceKind::Pawn || mv.is_capture() {
            // A piece on the target would reach back to every origin.
            return defended(&self.board, target, mover.flipped());
        }

        let back = -i32::from(mover.color().forward());
        let mut origins = Vec::with_capacity(2);
        if let Some(one) = target.offset(0, back) {
            origins.push(one);
            // Double pushes land on the fourth rank (White) or fifth (Black).
            let landing_rank = (i32::from(mover.color().pawn_rank()) - 2 * back) as u8;
            if self.board.at(one).is_none() && target.rank() == Ok(landing_rank) {
                origins.extend(one.offset(0, back));
            }
        }
        origins
    }
}

/// Return `false` if the king of `color` is attacked or touches the other king.
fn king_is_safe(board: &Board, color: Color) -> Result<bool, RuleViolation> {
    match board.is_in_check(color) {
        Ok(check) => Ok(!check),
        Err(RuleViolation::AdjacentKings) => Ok(false),
        Err(err) => Err(err),
    }
}

/// Regular squares between `a` and `b` on the same rank, both included.
fn span(a: Square, b: Square) -> impl Iterator<Item = Square> {
    let (a_file, b_file) = (a.file().unwrap_or(0), b.file().unwrap_or(0));
    let rank = i32::from(a.rank().unwrap_or(0));
    (a_file.min(b_file)..=a_file.max(b_file)).map(move |file| Square::new(i32::from(file), rank))
}
