use crate::board::PlaceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tag identifying the class of a game fault on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidMove,
    GameLogic,
    Protocol,
    Serialization,
    Timeout,
}

/// What the session should do to get back to a playable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recovery {
    /// The board is intact; drop the rejected action and keep playing.
    Rollback,
    /// Board integrity can no longer be trusted; start a fresh game,
    /// keeping only UI passthrough fields.
    Reset,
    /// Pick a move synchronously on the caller's side.
    Fallback,
}

/// Every failure the search/protocol core can produce. None of these
/// panic the foreground side.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid move: {0}")]
    InvalidMove(String),
    #[error("game logic fault: {0}")]
    GameLogic(String),
    #[error("protocol fault: {0}")]
    Protocol(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error("engine did not respond in time")]
    Timeout,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::InvalidMove(_) => ErrorKind::InvalidMove,
            GameError::GameLogic(_) => ErrorKind::GameLogic,
            GameError::Protocol(_) => ErrorKind::Protocol,
            GameError::Serialization(_) => ErrorKind::Serialization,
            GameError::Timeout => ErrorKind::Timeout,
        }
    }

    /// Every kind has a recovery path; nothing here is fatal to the app.
    pub fn recoverable(&self) -> bool {
        true
    }

    pub fn recovery(&self) -> Recovery {
        match self.kind() {
            ErrorKind::InvalidMove => Recovery::Rollback,
            ErrorKind::GameLogic | ErrorKind::Protocol | ErrorKind::Serialization => {
                Recovery::Reset
            }
            ErrorKind::Timeout => Recovery::Fallback,
        }
    }

    pub fn info(&self) -> ErrorInfo {
        ErrorInfo {
            message: self.to_string(),
            kind: self.kind(),
            recoverable: self.recoverable(),
        }
    }
}

impl From<PlaceError> for GameError {
    fn from(err: PlaceError) -> Self {
        GameError::InvalidMove(err.to_string())
    }
}

/// Serializable error payload carried by `GameState::Error` and the
/// response envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub message: String,
    pub kind: ErrorKind,
    pub recoverable: bool,
}

impl ErrorInfo {
    pub fn recovery(&self) -> Recovery {
        match self.kind {
            ErrorKind::InvalidMove => Recovery::Rollback,
            ErrorKind::GameLogic | ErrorKind::Protocol | ErrorKind::Serialization => {
                Recovery::Reset
            }
            ErrorKind::Timeout => Recovery::Fallback,
        }
    }
}

impl From<GameError> for ErrorInfo {
    fn from(err: GameError) -> Self {
        err.info()
    }
}

impl From<ErrorInfo> for GameError {
    fn from(info: ErrorInfo) -> Self {
        match info.kind {
            ErrorKind::InvalidMove => GameError::InvalidMove(info.message),
            ErrorKind::GameLogic => GameError::GameLogic(info.message),
            ErrorKind::Protocol => GameError::Protocol(info.message),
            ErrorKind::Serialization => GameError::Serialization(info.message),
            ErrorKind::Timeout => GameError::Timeout,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
