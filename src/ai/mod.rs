pub mod greedy;

use std::time::Duration;

use web_time::Instant;

use crate::board::Board;
use crate::movegen::Move;
use crate::types::{Player, Position};

pub use greedy::GreedySelector;

/// A move picked by an AI, with the score it was picked on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiChoice {
    pub from: Position,
    pub mv: Move,
    pub score: u32,
}

pub trait MoveSelector: Send + Sync {
    /// Returns `None` when `player` has no legal move.
    fn select_move(&self, board: &Board, player: Player) -> Option<AiChoice>;
}

/// An AI move that has been chosen but not yet committed.
///
/// The core never waits; `think_time` is only a hint for the host, which may
/// call `commit_ai_move` whenever it likes.
#[derive(Debug, Clone)]
pub struct PendingAiMove {
    pub player: Player,
    pub choice: AiChoice,
    pub think_time: Duration,
    chosen_at: Instant,
}

impl PendingAiMove {
    pub fn new(player: Player, choice: AiChoice, ms_per_point: u64) -> Self {
        let think_time = Duration::from_millis(u64::from(choice.score).saturating_mul(ms_per_point));
        Self {
            player,
            choice,
            think_time,
            chosen_at: Instant::now(),
        }
    }

    pub fn remaining(&self) -> Duration {
        self.think_time.saturating_sub(self.chosen_at.elapsed())
    }
}
