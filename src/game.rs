use log::{debug, info, warn};

use crate::ai::{GreedySelector, MoveSelector, PendingAiMove};
use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{CheckersError, CheckersResult, SaveError};
use crate::movegen::{self, Move};
use crate::save::SaveGame;
use crate::score::ScoreTracker;
use crate::transaction::MoveTransaction;
use crate::types::{Destination, GameState, GameStatus, MoveOutcome, MoveRecord, Player, Position};

/// Where the controller is in the select/release cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingSelection,
    TransactionOpen,
    GameOver(GameStatus),
}

/// Owns the board and drives turns, win/draw detection, persistence and the AI.
pub struct GameController {
    board: Board,
    current_player: Player,
    scores: ScoreTracker,
    moves_played: u32,
    status: GameStatus,
    transaction: Option<MoveTransaction>,
    pending_ai: Option<PendingAiMove>,
    last_move: Option<MoveRecord>,
    config: GameConfig,
    selector: Box<dyn MoveSelector>,
}

impl GameController {
    pub fn new(config: GameConfig, selector: Box<dyn MoveSelector>) -> Self {
        let mut game = Self {
            board: Board::opening(),
            current_player: Player::White,
            scores: ScoreTracker::default(),
            moves_played: 0,
            status: GameStatus::InProgress,
            transaction: None,
            pending_ai: None,
            last_move: None,
            config,
            selector,
        };
        game.finish_turn();
        game
    }

    pub fn new_with_default_selector(config: GameConfig) -> Self {
        Self::new(config, Box::new(GreedySelector))
    }

    /// Resets to the opening position with White to move.
    pub fn new_game(&mut self) {
        self.reset_to(Board::opening(), Player::White);
        info!("new game started");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn scores(&self) -> &ScoreTracker {
        &self.scores
    }

    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn pending_ai_move(&self) -> Option<&PendingAiMove> {
        self.pending_ai.as_ref()
    }

    pub fn open_transaction(&self) -> Option<&MoveTransaction> {
        self.transaction.as_ref()
    }

    pub fn phase(&self) -> TurnPhase {
        if self.status.is_over() {
            TurnPhase::GameOver(self.status)
        } else if self.transaction.is_some() {
            TurnPhase::TransactionOpen
        } else {
            TurnPhase::AwaitingSelection
        }
    }

    /// Opens a transaction for the current player's piece at `(x, y)` and
    /// returns its legal destinations. An already open transaction is
    /// rolled back first.
    pub fn select(&mut self, x: i32, y: i32) -> CheckersResult<Vec<Destination>> {
        if self.status.is_over() {
            return Err(CheckersError::GameOver);
        }
        if self.config.is_ai(self.current_player) {
            warn!("selection at {x};{y} ignored, {} is AI controlled", self.current_player.name());
            return Err(CheckersError::AiTurn);
        }

        let position = Position::new(x, y).ok_or_else(|| {
            warn!("{x};{y} is not valid board position");
            CheckersError::OutOfBounds { x, y }
        })?;

        let piece = self
            .board
            .get_piece_at(position)
            .filter(|piece| piece.owner == self.current_player)
            .copied()
            .ok_or_else(|| {
                warn!("no piece of {} at {x};{y}", self.current_player.name());
                CheckersError::NotCurrentPlayersPiece { x, y }
            })?;

        if let Some(previous) = self.transaction.take() {
            previous.rollback();
        }

        let transaction = MoveTransaction::open(piece, &self.board);
        let destinations = transaction.destinations();
        self.transaction = Some(transaction);
        Ok(destinations)
    }

    /// Releases the selected piece on `(x, y)`.
    ///
    /// A legal destination commits the move. Releasing on the origin cell
    /// rolls back quietly; any other cell rolls back and reports an error.
    pub fn attempt_move(&mut self, x: i32, y: i32) -> CheckersResult<MoveOutcome> {
        let transaction = self
            .transaction
            .take()
            .ok_or(CheckersError::NoOpenTransaction)?;

        let Some(target) = Position::new(x, y) else {
            warn!("{x};{y} is not valid board position");
            transaction.rollback();
            return Err(CheckersError::OutOfBounds { x, y });
        };

        if target == transaction.piece().position {
            transaction.rollback();
            return Ok(MoveOutcome::RolledBack);
        }

        let Some(mv) = transaction.find_candidate(target).cloned() else {
            warn!("{x};{y} is not a legal destination");
            transaction.rollback();
            return Err(CheckersError::IllegalDestination { x, y });
        };

        let outcome = self.commit(transaction, &mv);

        if !self.config.defer_ai_commit
            && self.pending_ai.is_some()
            && let Err(err) = self.commit_ai_move()
        {
            warn!("[AI] reply failed: {err}");
        }

        Ok(outcome)
    }

    /// Drops the open transaction, if any. Returns whether one was open.
    pub fn cancel(&mut self) -> bool {
        match self.transaction.take() {
            Some(transaction) => {
                transaction.rollback();
                true
            }
            None => false,
        }
    }

    /// Commits the AI move chosen when the turn passed to an AI side.
    pub fn commit_ai_move(&mut self) -> CheckersResult<MoveOutcome> {
        if self.status.is_over() {
            return Err(CheckersError::GameOver);
        }
        let pending = self
            .pending_ai
            .take()
            .filter(|pending| pending.player == self.current_player)
            .ok_or(CheckersError::NoPendingAiMove)?;

        let piece = self
            .board
            .get_piece_at(pending.choice.from)
            .filter(|piece| piece.owner == pending.player)
            .copied()
            .ok_or(CheckersError::NoPendingAiMove)?;

        self.cancel();
        let transaction = MoveTransaction::open(piece, &self.board);
        let Some(mv) = transaction
            .candidates()
            .iter()
            .find(|candidate| **candidate == pending.choice.mv)
            .cloned()
        else {
            transaction.rollback();
            return Err(CheckersError::NoPendingAiMove);
        };

        info!("[AI] {} plays score {} move", pending.player.name(), pending.choice.score);
        Ok(self.commit(transaction, &mv))
    }

    /// Lets the side to move play if it is AI controlled. Returns `None`
    /// when it is a human's turn, the game is over or the AI has no move.
    pub fn next_round(&mut self) -> CheckersResult<Option<MoveOutcome>> {
        if self.status.is_over() || !self.config.is_ai(self.current_player) {
            return Ok(None);
        }
        if self.pending_ai.is_none() {
            self.pending_ai = self.plan_ai_move();
        }
        if self.pending_ai.is_none() {
            return Ok(None);
        }
        self.commit_ai_move().map(Some)
    }

    /// Whether `player` has at least one legal move with any of its pieces.
    pub fn has_legal_move(&self, player: Player) -> bool {
        self.board
            .pieces_of(player)
            .any(|piece| !movegen::legal_moves(&self.board, piece).is_empty())
    }

    pub fn current_state(&self) -> GameState {
        GameState {
            grid: self.board.to_grid().iter().map(|row| row.to_vec()).collect(),
            current_player: self.current_player.id(),
            white_score: self.scores.get(Player::White),
            black_score: self.scores.get(Player::Black),
            moves_played: self.moves_played,
            status: self.status,
            is_game_over: self.status.is_over(),
            selected: self.transaction.as_ref().map(|tx| tx.piece().position),
            last_move: self.last_move.clone(),
        }
    }

    pub fn save(&self) -> SaveGame {
        SaveGame::capture(&self.board, self.current_player)
    }

    pub fn save_json(&self) -> Result<String, SaveError> {
        self.save().to_json()
    }

    /// Replaces the whole game with `save`. On error nothing changes.
    pub fn load(&mut self, save: &SaveGame) -> Result<(), SaveError> {
        let (board, next_player) = save.restore()?;
        self.reset_to(board, next_player);
        info!("game loaded, {} to move", next_player.name());
        Ok(())
    }

    pub fn load_json(&mut self, text: &str) -> Result<(), SaveError> {
        let save = SaveGame::from_json(text)?;
        self.load(&save)
    }

    fn reset_to(&mut self, board: Board, next_player: Player) {
        self.cancel();
        self.board = board;
        self.current_player = next_player;
        self.scores.reset();
        self.moves_played = 0;
        self.last_move = None;
        self.finish_turn();
    }

    fn commit(&mut self, transaction: MoveTransaction, mv: &Move) -> MoveOutcome {
        let commit = transaction.commit(
            mv,
            &mut self.board,
            &mut self.scores,
            &mut self.current_player,
        );

        self.moves_played += 1;
        debug!("board after move {}:\n{}", self.moves_played, self.board);

        let outcome = MoveOutcome::Committed {
            captured: commit.captured.len() as u8,
            promoted: commit.promoted,
        };
        self.last_move = Some(commit);
        self.finish_turn();
        outcome
    }

    fn finish_turn(&mut self) {
        self.pending_ai = None;
        self.status = self.evaluate_status();

        match self.status {
            GameStatus::Won { winner } => {
                info!("{} wins with score {}", winner.name(), self.scores.get(winner));
            }
            GameStatus::Draw { stuck } => {
                info!("draw, {} has no moves left", stuck.name());
            }
            GameStatus::InProgress => {
                if self.config.is_ai(self.current_player) {
                    self.pending_ai = self.plan_ai_move();
                }
            }
        }
    }

    fn evaluate_status(&self) -> GameStatus {
        let to_move = self.current_player;
        if self.board.count(to_move) == 0 {
            return GameStatus::Won {
                winner: to_move.opponent(),
            };
        }
        if self.board.count(to_move.opponent()) == 0 {
            return GameStatus::Won { winner: to_move };
        }
        if !self.has_legal_move(to_move) {
            return GameStatus::Draw { stuck: to_move };
        }
        GameStatus::InProgress
    }

    fn plan_ai_move(&self) -> Option<PendingAiMove> {
        let player = self.current_player;
        let choice = self.selector.select_move(&self.board, player)?;
        debug!(
            "[AI] {} chose {};{} -> {};{}",
            player.name(),
            choice.from.x,
            choice.from.y,
            choice.mv.destination.x,
            choice.mv.destination.y
        );
        Some(PendingAiMove::new(
            player,
            choice,
            self.config.ai_think_ms_per_point,
        ))
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        self.reset_to(board, current_player);
    }
}
