//! Background computation unit.
//!
//! One dedicated thread owns an [`Engine`] and serves search requests to
//! completion, one at a time. The only traffic across the thread boundary
//! is the serialized envelope from `ttt_core::protocol`; each request is a
//! self-contained snapshot and nothing is retained between requests, so
//! the same design would hold for a separate process or a web worker.

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, warn};
use ttt_core::protocol::{decode_request, encode_response, SearchResponse};
use ttt_core::{Engine, GameError};

use crate::dispatch::Dispatcher;

/// Handle to the background search thread.
///
/// The thread exits once this handle and every [`Dispatcher`] cloned from
/// it are gone, which closes the request channel.
pub struct Worker {
    request_tx: Sender<String>,
    response_rx: Receiver<String>,
}

impl Worker {
    /// Spawns the search thread, transferring ownership of `engine` to it.
    pub fn spawn(mut engine: Box<dyn Engine>) -> Worker {
        let (request_tx, request_rx) = bounded::<String>(1);
        let (response_tx, response_rx) = bounded::<String>(1);

        std::thread::spawn(move || {
            debug!(engine = engine.name(), "search worker started");
            while let Ok(raw) = request_rx.recv() {
                let response = handle_request(engine.as_mut(), &raw);
                let encoded = match encode_response(&response) {
                    Ok(s) => s,
                    Err(err) => {
                        warn!(error = %err, "could not encode search response");
                        continue;
                    }
                };
                if response_tx.send(encoded).is_err() {
                    break; // session side is gone
                }
            }
            debug!("search worker stopped");
        });

        Worker {
            request_tx,
            response_rx,
        }
    }

    /// A dispatcher wired to this worker's channels.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.request_tx.clone(), self.response_rx.clone())
    }
}

fn handle_request(engine: &mut dyn Engine, raw: &str) -> SearchResponse {
    let request = match decode_request(raw) {
        Ok(r) => r,
        Err(err) => {
            return SearchResponse::GameError {
                info: GameError::Protocol(err.to_string()).info(),
            }
        }
    };

    let Some(player) = request.active_player() else {
        return SearchResponse::GameError {
            info: GameError::Protocol("snapshot has no active player".into()).info(),
        };
    };

    let result = engine.search(&request.board, player, request.depth);
    debug!(
        player = %player,
        nodes = result.nodes,
        score = result.score,
        "search finished"
    );

    match result.best_move {
        Some(position) => SearchResponse::MoveMade {
            position,
            score: result.score,
            nodes: result.nodes,
        },
        None => {
            // The session never submits finished boards, so an empty
            // search result means the rules and the caller disagree.
            let message = if request.board.is_terminal() {
                "search requested on a finished board"
            } else {
                "search found no move on a live board"
            };
            SearchResponse::GameError {
                info: GameError::GameLogic(message.into()).info(),
            }
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
