use log::{debug, info};

use crate::board::{Board, Piece};
use crate::movegen::{self, Move};
use crate::score::ScoreTracker;
use crate::types::{Destination, MoveRecord, PieceKind, Player, Position};

/// A tentative move of one selected piece.
///
/// Opening computes the legal moves; the transaction then ends with exactly
/// one of [`MoveTransaction::commit`] or [`MoveTransaction::rollback`], both
/// of which consume it.
#[derive(Debug, Clone)]
pub struct MoveTransaction {
    piece: Piece,
    candidates: Vec<Move>,
}

impl MoveTransaction {
    pub fn open(piece: Piece, board: &Board) -> Self {
        let candidates = movegen::legal_moves(board, &piece);
        debug!(
            "{} piece at {};{} has {} legal moves",
            piece.owner.name(),
            piece.position.x,
            piece.position.y,
            candidates.len()
        );
        Self { piece, candidates }
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn candidates(&self) -> &[Move] {
        &self.candidates
    }

    pub fn destinations(&self) -> Vec<Destination> {
        self.candidates
            .iter()
            .map(|mv| Destination {
                position: mv.destination,
                is_jump: mv.is_jump(),
            })
            .collect()
    }

    /// The legal move ending at `target`, preferring the longest capture
    /// when several chains end on the same cell.
    pub fn find_candidate(&self, target: Position) -> Option<&Move> {
        self.candidates
            .iter()
            .filter(|mv| mv.destination == target)
            .max_by_key(|mv| mv.captured.len())
    }

    /// Applies `mv` to the board and hands the turn to the opponent.
    /// `mv` must come from [`MoveTransaction::find_candidate`] or
    /// [`MoveTransaction::candidates`].
    pub fn commit(
        self,
        mv: &Move,
        board: &mut Board,
        scores: &mut ScoreTracker,
        current_player: &mut Player,
    ) -> MoveRecord {
        let from = self.piece.position;
        let to = mv.destination;
        let mover = self.piece.owner;

        board.set_piece_at(from, None);
        board.set_piece_at(to, Some(self.piece));

        for &cell in &mv.captured {
            if board.take_piece_at(cell).is_some() {
                scores.increment(mover);
            }
        }

        let promoted = self.piece.kind == PieceKind::Plain && to.y == mover.promotion_row();
        if promoted {
            board.set_piece_at(to, Some(Piece::promoted(mover, to)));
        }

        *current_player = mover.opponent();

        info!(
            "{} moved {};{} -> {};{} capturing {}{}",
            mover.name(),
            from.x,
            from.y,
            to.x,
            to.y,
            mv.captured.len(),
            if promoted { ", promoted" } else { "" }
        );

        MoveRecord {
            player: mover,
            from,
            to,
            captured: mv.captured.clone(),
            promoted,
        }
    }

    /// Discards the transaction. The board is never touched.
    pub fn rollback(self) {
        debug!(
            "rolled back move of piece at {};{}",
            self.piece.position.x, self.piece.position.y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: u8, y: u8) -> Position {
        Position { x, y }
    }

    fn board_with(pieces: &[Piece]) -> Board {
        let mut board = Board::empty();
        for piece in pieces {
            board.set_piece_at(piece.position, Some(*piece));
        }
        board
    }

    #[test]
    fn find_candidate_returns_none_for_illegal_target() {
        let white = Piece::plain(Player::White, pos(3, 3));
        let tx = MoveTransaction::open(white, &board_with(&[white]));

        assert!(tx.find_candidate(pos(4, 4)).is_some());
        assert!(tx.find_candidate(pos(2, 2)).is_none());
        assert!(tx.find_candidate(pos(3, 3)).is_none());
    }

    #[test]
    fn commit_moves_piece_removes_captures_and_flips_turn() {
        let white = Piece::plain(Player::White, pos(3, 3));
        let mut board = board_with(&[
            white,
            Piece::plain(Player::Black, pos(4, 4)),
            Piece::plain(Player::Black, pos(6, 6)),
        ]);
        let mut scores = ScoreTracker::default();
        let mut current = Player::White;

        let tx = MoveTransaction::open(white, &board);
        let mv = tx.find_candidate(pos(7, 7)).cloned().unwrap();
        let commit = tx.commit(&mv, &mut board, &mut scores, &mut current);

        assert_eq!(commit.player, Player::White);
        assert_eq!(commit.from, pos(3, 3));
        assert_eq!(commit.captured.len(), 2);
        assert!(commit.promoted);
        assert_eq!(current, Player::Black);
        assert_eq!(scores.get(Player::White), 2);
        assert_eq!(board.count(Player::Black), 0);
        assert!(!board.has_piece_at(pos(3, 3)));
        let moved = board.get_piece_at(pos(7, 7)).unwrap();
        assert_eq!(moved.kind, PieceKind::Promoted);
        assert_eq!(moved.position, pos(7, 7));
    }

    #[test]
    fn black_is_promoted_on_row_zero_only() {
        let black = Piece::plain(Player::Black, pos(2, 1));
        let mut board = board_with(&[black]);
        let mut scores = ScoreTracker::default();
        let mut current = Player::Black;

        let tx = MoveTransaction::open(black, &board);
        let mv = tx.find_candidate(pos(1, 0)).cloned().unwrap();
        let commit = tx.commit(&mv, &mut board, &mut scores, &mut current);

        assert!(commit.promoted);
        assert!(board.get_piece_at(pos(1, 0)).unwrap().is_promoted());
        assert_eq!(current, Player::White);
    }

    #[test]
    fn promoted_piece_stays_promoted_when_leaving_far_row() {
        let king = Piece::promoted(Player::White, pos(2, 7));
        let mut board = board_with(&[king]);
        let mut scores = ScoreTracker::default();
        let mut current = Player::White;

        let tx = MoveTransaction::open(king, &board);
        let mv = tx.find_candidate(pos(3, 6)).cloned().unwrap();
        let commit = tx.commit(&mv, &mut board, &mut scores, &mut current);

        assert!(!commit.promoted);
        assert!(board.get_piece_at(pos(3, 6)).unwrap().is_promoted());
    }

    #[test]
    fn rollback_leaves_board_untouched() {
        let white = Piece::plain(Player::White, pos(3, 3));
        let board = board_with(&[white, Piece::plain(Player::Black, pos(4, 4))]);
        let before = board.clone();

        let tx = MoveTransaction::open(white, &board);
        assert_eq!(tx.destinations().len(), 2);
        tx.rollback();

        assert_eq!(board, before);
    }
}
