use crate::error::ErrorInfo;
use crate::types::Player;
use serde::{Deserialize, Serialize};

/// Lifecycle of one game instance.
///
/// Starts at `Waiting` for the first player. A valid move leads to
/// `Waiting`/`Thinking` for the other player, or to `Winner`/`Draw` when
/// the position is terminal. Any state may fall into `Error`; recovery
/// depends on the error kind. `Winner` and `Draw` are terminal for this
/// instance, only an explicit reset starts a new one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameState {
    Waiting { player: Player },
    Thinking { player: Player },
    Winner { player: Player },
    Draw,
    Error { info: ErrorInfo },
}

impl GameState {
    /// The player whose action is pending, if the game is still running.
    pub fn active_player(&self) -> Option<Player> {
        match self {
            GameState::Waiting { player } | GameState::Thinking { player } => Some(*player),
            _ => None,
        }
    }

    /// Terminal for the current game instance.
    pub fn is_over(&self) -> bool {
        matches!(self, GameState::Winner { .. } | GameState::Draw)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, GameState::Error { .. })
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameState::Waiting { player } => write!(f, "{player} to move"),
            GameState::Thinking { player } => write!(f, "{player} is thinking..."),
            GameState::Winner { player } => write!(f, "{player} wins"),
            GameState::Draw => write!(f, "draw"),
            GameState::Error { info } => write!(f, "error: {}", info.message),
        }
    }
}
