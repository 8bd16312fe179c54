//! Legal move enumeration in SAN.
//!
//! Pseudo-legal moves are written out with the shortest origin hint that
//! tells apart the pieces of one kind reaching the same square, then each is
//! tried on a copy of the position.

use crate::attacks::reachable;
use crate::castle_rights::CastleSide;
use crate::chess_move::Move;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

const PIECE_KINDS: [PieceKind; 5] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

impl Position {
    /// Return every legal move for the side to move as sorted SAN text.
    pub fn legal_moves(&self) -> Vec<String> {
        let mut moves: Vec<String> = self
            .successors()
            .into_iter()
            .map(|(mv, _)| mv.to_string())
            .collect();
        moves.sort();
        moves
    }

    /// Each legal move with the position it leads to.
    pub(crate) fn successors(&self) -> Vec<(Move, Position)> {
        self.candidate_moves()
            .into_iter()
            .filter_map(|mv| self.apply(&mv).ok().map(|next| (mv, next)))
            .collect()
    }

    /// Pseudo-legal moves of the side to move, including castling whenever
    /// the right is held.
    fn candidate_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.push_pawn_moves(&mut moves);
        for kind in PIECE_KINDS {
            self.push_piece_moves(kind, &mut moves);
        }
        for side in CastleSide::ALL {
            if self.castling().has(self.active_color(), side) {
                moves.push(Move::castle(side));
            }
        }
        moves
    }

    fn push_pawn_moves(&self, moves: &mut Vec<Move>) {
        let color = self.active_color();
        let pawn = Piece::new(PieceKind::Pawn, color);
        let board = self.board();

        for from in board.piece_locations(pawn) {
            for to in reachable(board, from, pawn, self.en_passant()) {
                // Diagonal steps are always captures, en passant included.
                let capture = to.file() != from.file();
                let origin = if capture { from.without_rank() } else { Square::NULL };
                if to.rank() == Ok(color.promotion_rank()) {
                    for kind in PieceKind::PROMOTIONS {
                        moves.push(Move::standard(PieceKind::Pawn, origin, capture, to, Some(kind)));
                    }
                } else {
                    moves.push(Move::standard(PieceKind::Pawn, origin, capture, to, None));
                }
            }
        }
    }

    fn push_piece_moves(&self, kind: PieceKind, moves: &mut Vec<Move>) {
        let piece = Piece::new(kind, self.active_color());
        let board = self.board();

        let mut origins_by_target = vec![Vec::new(); Square::COUNT];
        for from in board.piece_locations(piece) {
            for to in reachable(board, from, piece, Square::NULL) {
                if let Some(index) = to.index() {
                    origins_by_target[index].push(from);
                }
            }
        }

        for (target, origins) in Square::all().zip(&origins_by_target) {
            let capture = board.at(target).is_some();
            for &origin in origins {
                let hint = disambiguation(origin, origins);
                moves.push(Move::standard(kind, hint, capture, target, None));
            }
        }
    }
}

/// Origin hint for `origin` among all `origins` reaching the same target.
fn disambiguation(origin: Square, origins: &[Square]) -> Square {
    match origins {
        [_] => Square::NULL,
        [a, b] if a.file() != b.file() => origin.without_rank(),
        [_, _] => origin.without_file(),
        _ => origin,
    }
}
