use crate::board::Board;
use crate::types::Position;

/// Collects every empty cell in row-major order into `out`.
///
/// Enumeration order matters: search breaks score ties by keeping the
/// first move encountered, so this order is part of the contract.
pub fn legal_moves_into(board: &Board, out: &mut Vec<Position>) {
    out.clear();
    for i in 0..9 {
        if board.cell_by_index(i).is_none() {
            // Index is always in range here
            if let Some(pos) = Position::from_index(i) {
                out.push(pos);
            }
        }
    }
}

pub fn legal_moves(board: &Board) -> Vec<Position> {
    let mut moves = Vec::with_capacity(9);
    legal_moves_into(board, &mut moves);
    moves
}

#[cfg(test)]
#[path = "moves_tests.rs"]
mod moves_tests;
