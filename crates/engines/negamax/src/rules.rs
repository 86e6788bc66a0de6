use crate::eval::evaluate;
use ttt_core::search::GameSpec;
use ttt_core::{legal_moves, Board, Player, Position};

/// Tic-tac-toe rules bundle plugged into the generic search.
///
/// Moves enumerate empty cells in row-major order; that order is the
/// documented tie-break for equally scored moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl GameSpec for TicTacToe {
    type Node = Board;
    type Move = Position;
    type Player = Player;

    fn moves(&self, node: &Board) -> Vec<Position> {
        legal_moves(node)
    }

    fn apply(&self, player: Player, node: &Board, mv: Position) -> Board {
        // Moves come from `moves`, so the cell is known to be empty.
        node.with_move(player, mv)
    }

    fn score(&self, player: Player, node: &Board) -> i32 {
        evaluate(player, node)
    }

    fn is_terminal(&self, node: &Board) -> bool {
        node.is_terminal()
    }

    fn opponent(&self, player: Player) -> Player {
        player.other()
    }
}
