pub mod board;
pub mod error;
pub mod extended;
pub mod moves;
pub mod protocol;
pub mod search;
pub mod state;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::*;
pub use extended::Extended;
pub use moves::*;
pub use protocol::*;
pub use search::{GameSpec, SearchStats};
pub use state::GameState;
pub use types::*;

// =============================================================================
// Engine trait — implemented by every move-choosing engine
// =============================================================================

/// Result of a search operation.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Position>,
    /// Evaluation score from the searching player's perspective
    pub score: i32,
    /// Search depth used
    pub depth: u8,
    /// Number of nodes searched (for stats)
    pub nodes: u64,
}

/// Trait every engine implements, so the session layer can swap search
/// strategies without caring how a move is chosen.
pub trait Engine: Send {
    /// Search the position and pick a move for `player`.
    ///
    /// A board without legal moves yields `best_move: None`; that is game
    /// over, never an error.
    fn search(&mut self, board: &Board, player: Player, depth: u8) -> SearchResult;

    /// Engine name for identification in logs and UIs.
    fn name(&self) -> &str;

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}
