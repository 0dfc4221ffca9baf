use serde::Serialize;

use crate::board::BOARD_SIZE;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::White, Player::Black];

    /// Id used by the save format. `0` is reserved for "no player".
    pub const fn id(self) -> u8 {
        match self {
            Player::White => 1,
            Player::Black => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Player::White => "White",
            Player::Black => "Black",
        }
    }

    /// Row delta a plain piece of this side travels by.
    pub const fn forward(self) -> i8 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    /// Row on which a plain piece of this side is promoted.
    pub const fn promotion_row(self) -> u8 {
        match self {
            Player::White => (BOARD_SIZE - 1) as u8,
            Player::Black => 0,
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Player::White),
            2 => Some(Player::Black),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    Plain,
    Promoted,
}

const PLAIN_FORWARD: [(i8, i8); 2] = [(-1, 1), (1, 1)];
const PLAIN_BACKWARD: [(i8, i8); 2] = [(-1, -1), (1, -1)];
const ALL_DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

impl PieceKind {
    /// Diagonal unit offsets `(dx, dy)` a piece of this kind may travel along.
    pub fn offsets(self, owner: Player) -> &'static [(i8, i8)] {
        match (self, owner.forward()) {
            (PieceKind::Promoted, _) => &ALL_DIAGONALS,
            (PieceKind::Plain, forward) if forward > 0 => &PLAIN_FORWARD,
            (PieceKind::Plain, _) => &PLAIN_BACKWARD,
        }
    }
}

/// A board cell. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    /// Returns `None` when the coordinates fall outside the board.
    pub fn new(x: i32, y: i32) -> Option<Self> {
        if crate::board::Board::is_valid_position(x, y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        Self::new(self.x as i32 + dx as i32, self.y as i32 + dy as i32)
    }

    /// Row-major ordering key.
    pub(crate) fn row_major(self) -> (u8, u8) {
        (self.y, self.x)
    }
}

/// A legal destination of the selected piece, for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub position: Position,
    pub is_jump: bool,
}

/// Result of releasing the selected piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum MoveOutcome {
    Committed { captured: u8, promoted: bool },
    RolledBack,
}

/// A committed move, kept so the presentation layer can animate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub player: Player,
    pub from: Position,
    pub to: Position,
    pub captured: Vec<Position>,
    pub promoted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum GameStatus {
    InProgress,
    /// The opponent has no pieces left.
    Won { winner: Player },
    /// `stuck` still has pieces but none of them can move.
    Draw { stuck: Player },
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major signed grid, same encoding as the save format.
    pub grid: Vec<Vec<i8>>,
    pub current_player: u8,
    pub white_score: u32,
    pub black_score: u32,
    pub moves_played: u32,
    pub status: GameStatus,
    pub is_game_over: bool,
    /// Origin of the piece in an open transaction, if any.
    pub selected: Option<Position>,
    pub last_move: Option<MoveRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_offsets_follow_forward_direction() {
        assert_eq!(PieceKind::Plain.offsets(Player::White), &[(-1, 1), (1, 1)]);
        assert_eq!(PieceKind::Plain.offsets(Player::Black), &[(-1, -1), (1, -1)]);
        assert_eq!(PieceKind::Promoted.offsets(Player::Black).len(), 4);
    }

    #[test]
    fn position_rejects_out_of_board_coordinates() {
        assert_eq!(Position::new(7, 0), Some(Position { x: 7, y: 0 }));
        assert_eq!(Position::new(8, 0), None);
        assert_eq!(Position::new(0, -1), None);
        assert_eq!(Position { x: 0, y: 0 }.offset(-1, 1), None);
    }

    #[test]
    fn player_ids_round_trip() {
        for player in Player::ALL {
            assert_eq!(Player::from_id(player.id()), Some(player));
        }
        assert_eq!(Player::from_id(0), None);
        assert_eq!(Player::White.opponent(), Player::Black);
    }
}
