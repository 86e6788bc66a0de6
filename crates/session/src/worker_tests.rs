use super::*;
use negamax_engine::NegamaxEngine;
use std::time::Duration;
use ttt_core::protocol::{decode_response, encode_request, SearchRequest};
use ttt_core::{Board, ErrorKind, GameState, Player};

// Worker answers promptly; generous bound for slow CI machines.
const WAIT: Duration = Duration::from_secs(5);

fn spawn() -> Worker {
    Worker::spawn(Box::new(NegamaxEngine::new()))
}

fn send_raw(worker: &Worker, raw: String) -> SearchResponse {
    worker.request_tx.send(raw).unwrap();
    let answer = worker.response_rx.recv_timeout(WAIT).unwrap();
    decode_response(&answer).unwrap()
}

#[test]
fn test_worker_answers_a_live_position() {
    let worker = spawn();
    let request = SearchRequest::new(
        Board::new(),
        GameState::Thinking { player: Player::X },
        9,
    );

    let response = send_raw(&worker, encode_request(&request).unwrap());
    match response {
        SearchResponse::MoveMade {
            position, nodes, ..
        } => {
            assert!(position.in_bounds());
            assert!(nodes > 0);
        }
        other => panic!("expected a move, got {other:?}"),
    }
}

#[test]
fn test_worker_rejects_malformed_request() {
    let worker = spawn();
    let response = send_raw(&worker, "{definitely not json".into());
    match response {
        SearchResponse::GameError { info } => assert_eq!(info.kind, ErrorKind::Protocol),
        other => panic!("expected a protocol error, got {other:?}"),
    }
}

#[test]
fn test_worker_rejects_snapshot_without_active_player() {
    let worker = spawn();
    let request = SearchRequest::new(Board::new(), GameState::Draw, 9);

    let response = send_raw(&worker, encode_request(&request).unwrap());
    match response {
        SearchResponse::GameError { info } => assert_eq!(info.kind, ErrorKind::Protocol),
        other => panic!("expected a protocol error, got {other:?}"),
    }
}

#[test]
fn test_worker_flags_moveless_position_as_logic_fault() {
    let worker = spawn();
    let board: Board = "XOX/XXO/OXO".parse().unwrap();
    // The state claims the game is live, but the board has no moves left.
    let request = SearchRequest::new(board, GameState::Waiting { player: Player::X }, 9);

    let response = send_raw(&worker, encode_request(&request).unwrap());
    match response {
        SearchResponse::GameError { info } => assert_eq!(info.kind, ErrorKind::GameLogic),
        other => panic!("expected a game logic error, got {other:?}"),
    }
}

#[test]
fn test_worker_serves_consecutive_requests() {
    let worker = spawn();
    let mut dispatcher = worker.dispatcher();

    for _ in 0..3 {
        let request = SearchRequest::new(
            Board::new(),
            GameState::Thinking { player: Player::O },
            9,
        );
        dispatcher.submit(&request).unwrap().unwrap();
        let response = dispatcher.poll_timeout(WAIT).unwrap();
        assert!(matches!(response, Some(SearchResponse::MoveMade { .. })));
        dispatcher.resolve();
    }
}
