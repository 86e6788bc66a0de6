use crate::types::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The eight winning lines (rows, columns, diagonals) as cell indices.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceError {
    #[error("position {0:?} is out of bounds")]
    OutOfBounds(Position),
    #[error("cell {0} is already occupied")]
    Occupied(Position),
}

/// A 3x3 grid of cells. An occupied cell is never cleared except by
/// replacing the whole board on reset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Player>; 3]; 3],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` for an empty cell, and also for an out-of-range position;
    /// the board never panics on caller-constructed coordinates.
    pub fn get(&self, pos: Position) -> Option<Player> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.row as usize][pos.col as usize]
    }

    /// Validated placement: the entry point for externally supplied moves.
    pub fn place(&mut self, player: Player, pos: Position) -> Result<(), PlaceError> {
        if !pos.in_bounds() {
            return Err(PlaceError::OutOfBounds(pos));
        }
        if self.get(pos).is_some() {
            return Err(PlaceError::Occupied(pos));
        }
        self.cells[pos.row as usize][pos.col as usize] = Some(player);
        Ok(())
    }

    /// Copy-and-apply for moves already known to be legal. Search uses this
    /// on positions produced by `legal_moves`, so no validation here.
    pub fn with_move(&self, player: Player, pos: Position) -> Board {
        let mut next = self.clone();
        next.cells[pos.row as usize][pos.col as usize] = Some(player);
        next
    }

    pub fn cell_by_index(&self, i: usize) -> Option<Player> {
        self.cells[i / 3][i % 3]
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|c| c.is_some()))
    }

    /// The player owning a complete line, if any.
    pub fn winner(&self) -> Option<Player> {
        for line in LINES {
            if let Some(p) = self.cell_by_index(line[0]) {
                if self.cell_by_index(line[1]) == Some(p) && self.cell_by_index(line[2]) == Some(p)
                {
                    return Some(p);
                }
            }
        }
        None
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Number of marks placed so far.
    pub fn mark_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.is_some())
            .count()
    }
}

impl std::str::FromStr for Board {
    type Err = String;

    /// Parses a compact layout like "XX./OO./...", rows top to bottom.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split('/').collect();
        if rows.len() != 3 {
            return Err(format!("expected 3 rows, got {}", rows.len()));
        }
        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            let chars: Vec<char> = row.chars().collect();
            if chars.len() != 3 {
                return Err(format!("row {} must have 3 cells", r + 1));
            }
            for (c, ch) in chars.iter().enumerate() {
                board.cells[r][c] = match ch {
                    'X' | 'x' => Some(Player::X),
                    'O' | 'o' => Some(Player::O),
                    '.' | '_' => None,
                    other => return Err(format!("unexpected cell '{other}'")),
                };
            }
        }
        Ok(board)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  a b c")?;
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "{} ", r + 1)?;
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    Some(p) => write!(f, "{p}")?,
                    None => write!(f, ".")?,
                }
                if c + 1 < row.len() {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
