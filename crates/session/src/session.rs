//! Foreground game driver.
//!
//! Owns the authoritative board, the game lifecycle state, and the
//! dispatcher to the background search. Every failure lands in
//! [`GameState::Error`] rather than tearing the session down; `recover`
//! follows the error's recovery policy to get back to a playable state.

use chrono::Utc;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};
use ttt_core::protocol::{SearchRequest, SearchResponse};
use ttt_core::{Board, Engine, GameError, GameState, Player, Position, Recovery};

use crate::dispatch::{DispatchError, Dispatcher};

/// One game of tic-tac-toe against a background engine.
pub struct GameSession {
    board: Board,
    state: GameState,
    depth: u8,
    first_player: Player,
    dispatcher: Dispatcher,
    /// Synchronous engine used when the background search times out.
    fallback: Box<dyn Engine>,
    /// Player whose turn the current error interrupted.
    resume_player: Option<Player>,
    // UI passthrough fields; round-tripped through the envelope untouched.
    color_scheme: Value,
    window_size: Value,
}

impl GameSession {
    pub fn new(
        dispatcher: Dispatcher,
        fallback: Box<dyn Engine>,
        depth: u8,
        first_player: Player,
    ) -> Self {
        Self {
            board: Board::new(),
            state: GameState::Waiting {
                player: first_player,
            },
            depth,
            first_player,
            dispatcher,
            fallback,
            resume_player: None,
            color_scheme: Value::Null,
            window_size: Value::Null,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn color_scheme(&self) -> &Value {
        &self.color_scheme
    }

    pub fn window_size(&self) -> &Value {
        &self.window_size
    }

    pub fn set_color_scheme(&mut self, value: Value) {
        self.color_scheme = value;
    }

    pub fn set_window_size(&mut self, value: Value) {
        self.window_size = value;
    }

    /// Plays a foreground move for `player`.
    ///
    /// A rejected move leaves the board untouched, records the failure in
    /// [`GameState::Error`], and returns it; `recover` rolls back to the
    /// interrupted turn.
    pub fn play(&mut self, player: Player, position: Position) -> Result<(), GameError> {
        let turn_check = match &self.state {
            GameState::Waiting { player: expected } if *expected == player => Ok(()),
            GameState::Waiting { player: expected } => Err(GameError::InvalidMove(format!(
                "it is {expected}'s turn, not {player}'s"
            ))),
            GameState::Thinking { .. } => Err(GameError::InvalidMove(
                "the engine is still thinking".into(),
            )),
            GameState::Winner { .. } | GameState::Draw => {
                Err(GameError::InvalidMove("the game is over".into()))
            }
            GameState::Error { .. } => Err(GameError::InvalidMove(
                "the session needs recovery first".into(),
            )),
        };
        if let Err(err) = turn_check {
            self.fail(err.clone());
            return Err(err);
        }

        if let Err(err) = self.apply_move(player, position) {
            self.fail(err.clone());
            return Err(err);
        }
        Ok(())
    }

    /// Hands the current position to the background engine.
    ///
    /// Valid only while waiting for a player; the session moves to
    /// `Thinking` and the answer comes back through [`Self::poll_engine`].
    pub fn request_engine_move(&mut self) -> Result<(), GameError> {
        let player = match &self.state {
            GameState::Waiting { player } => *player,
            other => {
                return Err(GameError::GameLogic(format!(
                    "cannot start a search while {other}"
                )))
            }
        };

        self.state = GameState::Thinking { player };
        let mut request = SearchRequest::new(self.board.clone(), self.state.clone(), self.depth);
        request.color_scheme = self.color_scheme.clone();
        request.window_size = self.window_size.clone();
        request.timestamp = Some(Utc::now());

        match self.dispatcher.submit(&request) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => {
                self.fail(err.clone());
                Err(err)
            }
            Err(DispatchError::RequestInFlight) => {
                // `Thinking` and an idle dispatcher are kept in lockstep,
                // so this is a session bug, not a game event.
                let err = GameError::GameLogic("a search request is already in flight".into());
                self.fail(err.clone());
                Err(err)
            }
        }
    }

    /// Waits up to `timeout` for the engine and applies its move.
    ///
    /// `Ok(Some(position))` is an applied engine move; `Ok(None)` means
    /// nothing settled the request yet (passthrough traffic or a drained
    /// stale answer). Failures are recorded in the game state and
    /// returned.
    pub fn poll_engine(&mut self, timeout: Duration) -> Result<Option<Position>, GameError> {
        let response = match self.dispatcher.poll_timeout(timeout) {
            Ok(r) => r,
            Err(err) => {
                self.fail(err.clone());
                return Err(err);
            }
        };

        match response {
            None => Ok(None),
            Some(SearchResponse::MoveMade {
                position,
                score,
                nodes,
            }) => {
                let player = match &self.state {
                    GameState::Thinking { player } => *player,
                    other => {
                        let err = GameError::GameLogic(format!(
                            "received an engine move while {other}"
                        ));
                        self.fail(err.clone());
                        return Err(err);
                    }
                };
                if let Err(err) = self.apply_move(player, position) {
                    // The engine picked a cell the board rejects.
                    let err = GameError::GameLogic(err.to_string());
                    self.fail(err.clone());
                    return Err(err);
                }
                self.dispatcher.resolve();
                info!(%player, %position, score, nodes, "engine move applied");
                Ok(Some(position))
            }
            Some(SearchResponse::GameError { info }) => {
                let err = GameError::from(info);
                self.fail(err.clone());
                Err(err)
            }
            Some(SearchResponse::Resize { window_size }) => {
                self.window_size = window_size;
                Ok(None)
            }
            Some(SearchResponse::ColorSchemeChanged { color_scheme }) => {
                self.color_scheme = color_scheme;
                Ok(None)
            }
            Some(SearchResponse::Tick { .. }) => Ok(None),
        }
    }

    /// Applies the recovery policy of the recorded error.
    ///
    /// Rollback returns to the interrupted turn with the board untouched;
    /// Reset starts a fresh game; Fallback picks a move synchronously with
    /// the fallback engine and plays on.
    pub fn recover(&mut self) -> Result<(), GameError> {
        let info = match &self.state {
            GameState::Error { info } => info.clone(),
            _ => return Ok(()),
        };

        match info.recovery() {
            Recovery::Rollback => {
                let player = self.resume_player.take().unwrap_or(self.first_player);
                self.state = GameState::Waiting { player };
                Ok(())
            }
            Recovery::Reset => {
                warn!(message = %info.message, "resetting game after unrecoverable board state");
                self.reset();
                Ok(())
            }
            Recovery::Fallback => {
                let player = self.resume_player.take().unwrap_or(self.first_player);
                let result = self.fallback.search(&self.board, player, self.depth);
                match result.best_move {
                    Some(position) => {
                        info!(%player, %position, engine = self.fallback.name(),
                            "fallback engine move");
                        if let Err(err) = self.apply_move(player, position) {
                            let err = GameError::GameLogic(err.to_string());
                            self.fail(err.clone());
                            return Err(err);
                        }
                        Ok(())
                    }
                    None => {
                        let err =
                            GameError::GameLogic("fallback search found no move".into());
                        self.fail(err.clone());
                        Err(err)
                    }
                }
            }
        }
    }

    /// Starts a fresh game, keeping the UI passthrough fields.
    ///
    /// An in-flight search is abandoned; its late answer will be dropped
    /// instead of landing on the new board.
    pub fn reset(&mut self) {
        self.dispatcher.abandon();
        self.fallback.new_game();
        self.board = Board::new();
        self.state = GameState::Waiting {
            player: self.first_player,
        };
        self.resume_player = None;
    }

    fn apply_move(&mut self, player: Player, position: Position) -> Result<(), GameError> {
        self.board.place(player, position)?;
        self.resume_player = None;
        self.state = if let Some(winner) = self.board.winner() {
            GameState::Winner { player: winner }
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            GameState::Waiting {
                player: player.other(),
            }
        };
        Ok(())
    }

    fn fail(&mut self, err: GameError) {
        if self.resume_player.is_none() {
            self.resume_player = self.state.active_player();
        }
        warn!(error = %err, "game error recorded");
        self.state = GameState::Error { info: err.info() };
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
