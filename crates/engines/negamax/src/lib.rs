//! Negamax Tic-Tac-Toe Engine
//!
//! Negamax search with alpha-beta pruning over the generic search in
//! `ttt_core`, with open-line evaluation. Nine plies cover the whole game
//! tree on a 3x3 board, so the default search is exhaustive.

mod eval;
mod rules;

use ttt_core::search::{negamax_alpha_beta, SearchStats};
use ttt_core::{Board, Engine, Player, Position, SearchResult};

pub use eval::{evaluate, WIN_SCORE};
pub use rules::TicTacToe;


/// Depth covering every line of play on a 3x3 board.
pub const FULL_DEPTH: u8 = 9;

/// Picks the best move for `player`, searching the full game tree.
///
/// Returns `None` on a board without legal moves (game over). Ties are
/// broken toward the first candidate in row-major order, so repeated
/// calls on the same position always return the same move.
pub fn find_best_move(player: Player, board: &Board) -> Option<Position> {
    let mut stats = SearchStats::default();
    negamax_alpha_beta(&TicTacToe, player, board, FULL_DEPTH, &mut stats).map(|(mv, _)| mv)
}

/// Engine wrapper around the exhaustive negamax search.
#[derive(Debug, Clone, Copy, Default)]
pub struct NegamaxEngine {
    stats: SearchStats,
}

impl NegamaxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters from the most recent search.
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }
}

impl Engine for NegamaxEngine {
    fn search(&mut self, board: &Board, player: Player, depth: u8) -> SearchResult {
        self.stats = SearchStats::default();
        let outcome = negamax_alpha_beta(&TicTacToe, player, board, depth, &mut self.stats);

        SearchResult {
            best_move: outcome.map(|(mv, _)| mv),
            score: outcome.and_then(|(_, value)| value.value()).unwrap_or(0),
            depth,
            nodes: self.stats.nodes,
        }
    }

    fn name(&self) -> &str {
        "Negamax v1.0"
    }

    fn new_game(&mut self) {
        self.stats = SearchStats::default();
    }
}
