use serde::{Deserialize, Serialize};

use crate::board::{BOARD_SIZE, Board, Piece};
use crate::error::SaveError;
use crate::types::{Player, Position};

/// Persisted game: side to move plus the signed grid.
///
/// `pawns` is row-major (`pawns[y][x]`). `0` is empty, a positive player id
/// is a plain piece and a negative one is a promoted piece.
///
/// `next_player` accepts `1` or `2` only. `0` ("no player") is rejected by
/// [`SaveGame::restore`] with [`SaveError::NoSideToMove`], since a game
/// always has a side to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGame {
    pub next_player: i64,
    pub pawns: [[i8; BOARD_SIZE]; BOARD_SIZE],
}

impl SaveGame {
    pub fn capture(board: &Board, next_player: Player) -> Self {
        Self {
            next_player: next_player.id() as i64,
            pawns: board.to_grid(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Builds the board and side to move, validating every cell first.
    pub fn restore(&self) -> Result<(Board, Player), SaveError> {
        let next_player = match self.next_player {
            0 => return Err(SaveError::NoSideToMove),
            id => u8::try_from(id)
                .ok()
                .and_then(Player::from_id)
                .ok_or(SaveError::UnknownPlayer(id))?,
        };

        let mut board = Board::empty();
        for (y, row) in self.pawns.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let owner = Player::from_id(value.unsigned_abs())
                    .ok_or(SaveError::InvalidCell { x, y, value })?;
                let position = Position {
                    x: x as u8,
                    y: y as u8,
                };
                let piece = if value < 0 {
                    Piece::promoted(owner, position)
                } else {
                    Piece::plain(owner, position)
                };
                board.set_piece_at(position, Some(piece));
            }
        }

        Ok((board, next_player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_document_and_restores_promoted_pieces() {
        let mut rows = vec!["[0,0,0,0,0,0,0,0]"; 8];
        rows[0] = "[0,1,0,0,0,0,0,0]";
        rows[7] = "[0,0,-2,0,0,0,0,0]";
        let text = format!(r#"{{"next_player": 2, "pawns": [{}]}}"#, rows.join(","));

        let save = SaveGame::from_json(&text).expect("must parse");
        let (board, next) = save.restore().expect("must restore");

        assert_eq!(next, Player::Black);
        assert_eq!(board.count(Player::White), 1);
        let king = board.get_piece_at(Position { x: 2, y: 7 }).unwrap();
        assert_eq!(king.owner, Player::Black);
        assert!(king.is_promoted());
    }

    #[test]
    fn save_then_restore_reproduces_grid_and_player() {
        let board = Board::opening();
        let save = SaveGame::capture(&board, Player::Black);

        let text = save.to_json().unwrap();
        let (restored, next) = SaveGame::from_json(&text).unwrap().restore().unwrap();

        assert_eq!(restored, board);
        assert_eq!(next, Player::Black);
    }

    #[test]
    fn rejects_unknown_cell_value() {
        let mut save = SaveGame::capture(&Board::empty(), Player::White);
        save.pawns[4][5] = 3;

        let err = save.restore().unwrap_err();

        assert!(matches!(err, SaveError::InvalidCell { x: 5, y: 4, value: 3 }));
    }

    #[test]
    fn rejects_missing_or_unknown_side_to_move() {
        let mut save = SaveGame::capture(&Board::empty(), Player::White);

        save.next_player = 0;
        assert!(matches!(save.restore(), Err(SaveError::NoSideToMove)));

        save.next_player = 7;
        assert!(matches!(save.restore(), Err(SaveError::UnknownPlayer(7))));
    }

    #[test]
    fn rejects_malformed_json() {
        let short_row = r#"{"next_player": 1, "pawns": [[0,0,0]]}"#;

        assert!(matches!(SaveGame::from_json(short_row), Err(SaveError::Json(_))));
        assert!(matches!(SaveGame::from_json("not json"), Err(SaveError::Json(_))));
    }
}
