use log::debug;

use crate::ai::{AiChoice, MoveSelector};
use crate::board::Board;
use crate::movegen::{self, Move};
use crate::types::Player;

const BASE_SCORE: u32 = 1;
const CAPTURE_SCORE: u32 = 10;

/// One-ply greedy opponent: plays the move capturing the most pieces.
///
/// Ties go to the lowest origin, then the lowest destination, both in
/// row-major order.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedySelector;

impl MoveSelector for GreedySelector {
    fn select_move(&self, board: &Board, player: Player) -> Option<AiChoice> {
        let mut best: Option<AiChoice> = None;
        let mut considered = 0usize;

        for piece in board.pieces_of(player) {
            for mv in movegen::legal_moves(board, piece) {
                considered += 1;
                let candidate = AiChoice {
                    from: piece.position,
                    score: score_move(&mv),
                    mv,
                };
                if best.as_ref().is_none_or(|best| is_better_choice(&candidate, best)) {
                    best = Some(candidate);
                }
            }
        }

        debug!(
            "{} AI considered {considered} moves, best score {:?}",
            player.name(),
            best.as_ref().map(|choice| choice.score)
        );
        best
    }
}

pub fn score_move(mv: &Move) -> u32 {
    BASE_SCORE + CAPTURE_SCORE * mv.captured.len() as u32
}

fn is_better_choice(candidate: &AiChoice, best: &AiChoice) -> bool {
    candidate.score > best.score
        || (candidate.score == best.score
            && (candidate.from.row_major(), candidate.mv.destination.row_major())
                < (best.from.row_major(), best.mv.destination.row_major()))
}
