//! Wire envelope exchanged with the background computation unit.
//!
//! Requests are full, self-contained game snapshots; the computation unit
//! must not retain anything across calls. The same channel also carries a
//! few UI passthrough messages (resize, tick, color scheme) for
//! convenience; the search core round-trips those untouched and otherwise
//! ignores them.

use crate::board::Board;
use crate::error::ErrorInfo;
use crate::state::GameState;
use crate::types::{Player, Position};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A complete game snapshot handed to the computation unit.
///
/// `color_scheme` and `window_size` are opaque to the core: they belong to
/// the UI layer and only have to survive an encode/decode round trip
/// unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub board: Board,
    pub state: GameState,
    pub depth: u8,
    #[serde(default)]
    pub color_scheme: Value,
    #[serde(default)]
    pub window_size: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SearchRequest {
    pub fn new(board: Board, state: GameState, depth: u8) -> Self {
        Self {
            board,
            state,
            depth,
            color_scheme: Value::Null,
            window_size: Value::Null,
            timestamp: None,
        }
    }

    /// Player the computation unit should search for.
    pub fn active_player(&self) -> Option<Player> {
        self.state.active_player()
    }
}

/// Message from the computation unit back to the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchResponse {
    /// The engine chose a move.
    MoveMade {
        position: Position,
        score: i32,
        nodes: u64,
    },
    /// Structured failure; the session maps it onto `GameState::Error`.
    GameError { info: ErrorInfo },
    // UI passthrough traffic sharing the channel; not the search core's
    // concern.
    Resize { window_size: Value },
    Tick { timestamp: DateTime<Utc> },
    ColorSchemeChanged { color_scheme: Value },
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("failed to encode message: {0}")]
    Encode(serde_json::Error),
    #[error("failed to decode message: {0}")]
    Decode(serde_json::Error),
}

pub fn encode_request(request: &SearchRequest) -> Result<String, CodecError> {
    serde_json::to_string(request).map_err(CodecError::Encode)
}

pub fn decode_request(raw: &str) -> Result<SearchRequest, CodecError> {
    serde_json::from_str(raw).map_err(CodecError::Decode)
}

pub fn encode_response(response: &SearchResponse) -> Result<String, CodecError> {
    serde_json::to_string(response).map_err(CodecError::Encode)
}

pub fn decode_response(raw: &str) -> Result<SearchResponse, CodecError> {
    serde_json::from_str(raw).map_err(CodecError::Decode)
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
