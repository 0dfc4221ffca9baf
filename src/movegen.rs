use crate::board::{Board, Piece};
use crate::types::Position;

/// Guard against pathological positions; never reached in normal play.
const MAX_CHAIN_DEPTH: u8 = 12;

/// A candidate move: where the piece ends up and which cells it jumps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub destination: Position,
    /// Captured cells in jump order, without duplicates. Empty for a simple step.
    pub captured: Vec<Position>,
}

impl Move {
    pub fn step(destination: Position) -> Self {
        Self {
            destination,
            captured: Vec::new(),
        }
    }

    pub fn is_jump(&self) -> bool {
        !self.captured.is_empty()
    }

    fn same_as(&self, other: &Move) -> bool {
        if self.destination != other.destination || self.captured.len() != other.captured.len() {
            return false;
        }
        let mut left = self.captured.clone();
        let mut right = other.captured.clone();
        left.sort();
        right.sort();
        left == right
    }
}

/// Returns every legal move for `piece`. The board is not modified.
///
/// Simple steps are considered only at the first level; once a capture has
/// been made the search continues jumps-only, and a jump is recorded only
/// when no further jump extends it.
pub fn legal_moves(board: &Board, piece: &Piece) -> Vec<Move> {
    let found = search(board, piece, piece.position, &[], false, 0);

    let mut moves: Vec<Move> = Vec::with_capacity(found.len());
    for mv in found {
        if !moves.iter().any(|known| known.same_as(&mv)) {
            moves.push(mv);
        }
    }
    moves
}

fn search(
    board: &Board,
    piece: &Piece,
    from: Position,
    captured: &[Position],
    jumps_only: bool,
    depth: u8,
) -> Vec<Move> {
    let mut moves = Vec::new();
    if depth > MAX_CHAIN_DEPTH {
        return moves;
    }

    for &(dx, dy) in piece.kind.offsets(piece.owner) {
        let Some(target) = from.offset(dx, dy) else {
            continue;
        };

        let Some(occupant) = board.get_piece_at(target) else {
            if !jumps_only {
                moves.push(Move::step(target));
            }
            continue;
        };

        if occupant.owner == piece.owner || captured.contains(&target) {
            continue;
        }

        let Some(landing) = target.offset(dx, dy) else {
            continue;
        };
        if board.has_piece_at(landing) {
            continue;
        }

        let mut chain = captured.to_vec();
        chain.push(target);

        let continuations = search(board, piece, landing, &chain, true, depth + 1);
        if continuations.is_empty() {
            moves.push(Move {
                destination: landing,
                captured: chain,
            });
        } else {
            moves.extend(continuations);
        }
    }

    moves
}
