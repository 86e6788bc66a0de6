use serde::{Deserialize, Serialize};

/// Side of the board: 3x3 tic-tac-toe.
pub const BOARD_SIZE: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A cell coordinate. Row 0 is the top row, column 0 the left column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Row-major cell index in 0..9.
    pub fn index(self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + self.col as usize
    }

    pub fn from_index(i: usize) -> Option<Position> {
        if i < (BOARD_SIZE as usize) * (BOARD_SIZE as usize) {
            Some(Position::new(
                (i / BOARD_SIZE as usize) as u8,
                (i % BOARD_SIZE as usize) as u8,
            ))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", pos_to_coord(*self))
    }
}

/// Formats a position as a coordinate like "b2" (columns a-c, rows 1-3 from the top).
pub fn pos_to_coord(pos: Position) -> String {
    let c = (b'a' + pos.col) as char;
    let r = (b'1' + pos.row) as char;
    format!("{c}{r}")
}

pub fn coord_to_pos(c: &str) -> Option<Position> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let col = b[0];
    let row = b[1];
    if !(b'a'..b'a' + BOARD_SIZE).contains(&col) || !(b'1'..b'1' + BOARD_SIZE).contains(&row) {
        return None;
    }
    Some(Position::new(row - b'1', col - b'a'))
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
