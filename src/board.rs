use std::fmt;

use once_cell::sync::Lazy;

use crate::types::{PieceKind, Player, Position};

pub const BOARD_SIZE: usize = 8;
const OPENING_ROWS: usize = 3;

static OPENING: Lazy<Board> = Lazy::new(Board::build_opening);

/// A piece in play. Its `position` always matches the cell holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub owner: Player,
    pub position: Position,
    pub kind: PieceKind,
}

impl Piece {
    pub fn plain(owner: Player, position: Position) -> Self {
        Self {
            owner,
            position,
            kind: PieceKind::Plain,
        }
    }

    pub fn promoted(owner: Player, position: Position) -> Self {
        Self {
            owner,
            position,
            kind: PieceKind::Promoted,
        }
    }

    pub fn is_promoted(&self) -> bool {
        self.kind == PieceKind::Promoted
    }

    /// Signed save-format code: owner id, negated when promoted.
    pub fn code(&self) -> i8 {
        let id = self.owner.id() as i8;
        if self.is_promoted() { -id } else { id }
    }
}

/// 8x8 grid of optional pieces, indexed `[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Standard opening: White on rows 0-2, Black on rows 5-7, dark squares only.
    pub fn opening() -> Self {
        OPENING.clone()
    }

    fn build_opening() -> Self {
        let mut board = Self::empty();
        for y in 0..BOARD_SIZE {
            let owner = if y < OPENING_ROWS {
                Player::White
            } else if y >= BOARD_SIZE - OPENING_ROWS {
                Player::Black
            } else {
                continue;
            };
            for x in (0..BOARD_SIZE).filter(|x| (x + y) % 2 == 1) {
                let position = Position {
                    x: x as u8,
                    y: y as u8,
                };
                board.set_piece_at(position, Some(Piece::plain(owner, position)));
            }
        }
        board
    }

    pub fn is_valid_position(x: i32, y: i32) -> bool {
        (0..BOARD_SIZE as i32).contains(&x) && (0..BOARD_SIZE as i32).contains(&y)
    }

    pub fn has_piece_at(&self, position: Position) -> bool {
        self.get_piece_at(position).is_some()
    }

    /// Out-of-range positions read as empty.
    pub fn get_piece_at(&self, position: Position) -> Option<&Piece> {
        self.cells
            .get(position.y as usize)
            .and_then(|row| row.get(position.x as usize))
            .and_then(Option::as_ref)
    }

    /// Stores `piece` at `position`, rewriting its coordinates to match.
    /// Out-of-range positions are ignored.
    pub fn set_piece_at(&mut self, position: Position, piece: Option<Piece>) {
        if let Some(cell) = self
            .cells
            .get_mut(position.y as usize)
            .and_then(|row| row.get_mut(position.x as usize))
        {
            *cell = piece.map(|piece| Piece { position, ..piece });
        }
    }

    pub fn take_piece_at(&mut self, position: Position) -> Option<Piece> {
        self.cells
            .get_mut(position.y as usize)
            .and_then(|row| row.get_mut(position.x as usize))
            .and_then(Option::take)
    }

    /// All pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten().flatten()
    }

    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |piece| piece.owner == player)
    }

    pub fn count(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }

    /// Row-major signed grid: 0 empty, owner id for plain, negated id for promoted.
    pub fn to_grid(&self) -> [[i8; BOARD_SIZE]; BOARD_SIZE] {
        let mut grid = [[0i8; BOARD_SIZE]; BOARD_SIZE];
        for piece in self.pieces() {
            grid[piece.position.y as usize][piece.position.x as usize] = piece.code();
        }
        grid
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let symbol = match cell {
                    None => '_',
                    Some(piece) => match (piece.owner, piece.kind) {
                        (Player::White, PieceKind::Plain) => 'w',
                        (Player::White, PieceKind::Promoted) => 'W',
                        (Player::Black, PieceKind::Plain) => 'b',
                        (Player::Black, PieceKind::Promoted) => 'B',
                    },
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
