//! Request/response state machine between the game and the computation
//! unit.
//!
//! At most one request is ever outstanding. Submitting while one is in
//! flight is rejected as a caller bug; responses belonging to an abandoned
//! request (after a reset or a timeout) are drained and dropped instead of
//! being applied to a board they were not computed for.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use ttt_core::protocol::{decode_response, encode_request, SearchRequest, SearchResponse};
use ttt_core::GameError;

/// Where the dispatcher is in the request/response exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchState {
    /// No request outstanding; ready to submit.
    Idle,
    /// Serializing and handing the request to the channel.
    Dispatching,
    /// Request sent; waiting for the matching response.
    AwaitingResult,
    /// A move response arrived and is being applied to the game.
    Applying,
    /// The exchange failed; the error has been surfaced to the caller.
    Failed,
}

/// Misuse of the dispatcher by the caller, as opposed to a [`GameError`]
/// coming back over the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("a search request is already in flight")]
    RequestInFlight,
}

/// One side of the channel pair connecting the game to the worker.
///
/// Holds the single-outstanding-request invariant and the stale-response
/// bookkeeping; it never looks inside the game itself.
pub struct Dispatcher {
    tx: Sender<String>,
    rx: Receiver<String>,
    state: DispatchState,
    /// Responses still owed to requests we gave up on. Each one that
    /// arrives is dropped instead of delivered.
    stale: u32,
}

impl Dispatcher {
    pub fn new(tx: Sender<String>, rx: Receiver<String>) -> Self {
        Self {
            tx,
            rx,
            state: DispatchState::Idle,
            stale: 0,
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Sends `request` to the computation unit.
    ///
    /// `Err(DispatchError)` is caller misuse and leaves the dispatcher
    /// untouched; `Ok(Err(GameError))` is a transport or serialization
    /// failure and moves the dispatcher to [`DispatchState::Failed`].
    pub fn submit(
        &mut self,
        request: &SearchRequest,
    ) -> Result<Result<(), GameError>, DispatchError> {
        match self.state {
            DispatchState::Dispatching | DispatchState::AwaitingResult => {
                return Err(DispatchError::RequestInFlight)
            }
            DispatchState::Idle | DispatchState::Applying | DispatchState::Failed => {}
        }

        self.state = DispatchState::Dispatching;
        let encoded = match encode_request(request) {
            Ok(s) => s,
            Err(err) => {
                self.state = DispatchState::Failed;
                return Ok(Err(GameError::Serialization(err.to_string())));
            }
        };
        if self.tx.send(encoded).is_err() {
            self.state = DispatchState::Failed;
            return Ok(Err(GameError::Protocol(
                "computation unit is no longer reachable".into(),
            )));
        }
        debug!(depth = request.depth, "search request dispatched");
        self.state = DispatchState::AwaitingResult;
        Ok(Ok(()))
    }

    /// Waits up to `timeout` for the response to the outstanding request.
    ///
    /// Answers owed to abandoned requests are dropped instead of
    /// delivered; requests are served in order, so while stale slots are
    /// open the next settling answer on the channel belongs to one of
    /// them. UI passthrough messages are not answers and are handed to
    /// the caller no matter what. `Ok(None)` means nothing settled
    /// anything within `timeout` and no live request was waiting; a live
    /// request that produces nothing is a [`GameError::Timeout`].
    pub fn poll_timeout(&mut self, timeout: Duration) -> Result<Option<SearchResponse>, GameError> {
        let deadline = std::time::Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            let raw = match self.rx.recv_timeout(remaining) {
                Ok(raw) => raw,
                Err(RecvTimeoutError::Timeout) => {
                    if self.state == DispatchState::AwaitingResult {
                        // The answer may still arrive later; treat it as
                        // stale when it does.
                        self.stale += 1;
                        self.state = DispatchState::Failed;
                        return Err(GameError::Timeout);
                    }
                    return Ok(None);
                }
                Err(RecvTimeoutError::Disconnected) => {
                    self.state = DispatchState::Failed;
                    return Err(GameError::Protocol(
                        "computation unit is no longer reachable".into(),
                    ));
                }
            };

            let response = match decode_response(&raw) {
                Ok(r) => r,
                Err(err) => {
                    if self.stale > 0 {
                        // Undecodable answer to an abandoned request.
                        self.stale -= 1;
                        warn!(pending_stale = self.stale, "dropped stale search response");
                        continue;
                    }
                    self.state = DispatchState::Failed;
                    return Err(GameError::Protocol(err.to_string()));
                }
            };

            match &response {
                SearchResponse::MoveMade { .. } | SearchResponse::GameError { .. } => {
                    if self.stale > 0 {
                        self.stale -= 1;
                        warn!(pending_stale = self.stale, "dropped stale search response");
                        continue;
                    }
                    if self.state != DispatchState::AwaitingResult {
                        warn!("dropped response with no request outstanding");
                        continue;
                    }
                    self.state = if matches!(response, SearchResponse::MoveMade { .. }) {
                        DispatchState::Applying
                    } else {
                        DispatchState::Failed
                    };
                }
                // UI passthrough traffic is not an answer: it neither
                // settles the live request nor consumes a stale slot.
                SearchResponse::Resize { .. }
                | SearchResponse::Tick { .. }
                | SearchResponse::ColorSchemeChanged { .. } => {}
            }
            return Ok(Some(response));
        }
    }

    /// Marks the applied move as done, returning to [`DispatchState::Idle`].
    pub fn resolve(&mut self) {
        self.state = DispatchState::Idle;
    }

    /// Gives up on the outstanding request, if any.
    ///
    /// The worker will still answer it; that answer is recorded as stale
    /// and dropped when it arrives. Used on game reset.
    pub fn abandon(&mut self) {
        if matches!(
            self.state,
            DispatchState::Dispatching | DispatchState::AwaitingResult
        ) {
            self.stale += 1;
            debug!(pending_stale = self.stale, "abandoned in-flight request");
        }
        self.state = DispatchState::Idle;
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod dispatch_tests;
