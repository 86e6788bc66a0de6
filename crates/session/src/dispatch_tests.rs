use super::*;
use crossbeam_channel::unbounded;
use std::time::Duration;
use ttt_core::protocol::encode_response;
use ttt_core::{Board, ErrorKind, GameState, Player, Position};

const TICK: Duration = Duration::from_millis(20);

fn request() -> SearchRequest {
    SearchRequest::new(
        Board::new(),
        GameState::Thinking { player: Player::O },
        9,
    )
}

/// Dispatcher wired to loose channel ends so tests can play the worker.
fn harness() -> (Dispatcher, Receiver<String>, Sender<String>) {
    let (req_tx, req_rx) = unbounded::<String>();
    let (resp_tx, resp_rx) = unbounded::<String>();
    (Dispatcher::new(req_tx, resp_rx), req_rx, resp_tx)
}

fn move_at(row: u8, col: u8) -> SearchResponse {
    SearchResponse::MoveMade {
        position: Position::new(row, col),
        score: 0,
        nodes: 42,
    }
}

fn move_made() -> SearchResponse {
    move_at(1, 1)
}

#[test]
fn test_submit_then_response_round_trip() {
    let (mut dispatcher, req_rx, resp_tx) = harness();
    assert_eq!(dispatcher.state(), DispatchState::Idle);

    dispatcher.submit(&request()).unwrap().unwrap();
    assert_eq!(dispatcher.state(), DispatchState::AwaitingResult);
    assert!(req_rx.try_recv().is_ok());

    resp_tx.send(encode_response(&move_made()).unwrap()).unwrap();
    let response = dispatcher.poll_timeout(TICK).unwrap();
    assert_eq!(response, Some(move_made()));
    assert_eq!(dispatcher.state(), DispatchState::Applying);

    dispatcher.resolve();
    assert_eq!(dispatcher.state(), DispatchState::Idle);
}

#[test]
fn test_second_submit_is_rejected_while_awaiting() {
    let (mut dispatcher, _req_rx, _resp_tx) = harness();
    dispatcher.submit(&request()).unwrap().unwrap();

    let err = dispatcher.submit(&request()).unwrap_err();
    assert_eq!(err, DispatchError::RequestInFlight);
    // The rejection must not disturb the live exchange.
    assert_eq!(dispatcher.state(), DispatchState::AwaitingResult);
}

#[test]
fn test_malformed_response_fails_the_exchange() {
    let (mut dispatcher, _req_rx, resp_tx) = harness();
    dispatcher.submit(&request()).unwrap().unwrap();

    resp_tx.send("{not json".into()).unwrap();
    let err = dispatcher.poll_timeout(TICK).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(dispatcher.state(), DispatchState::Failed);
}

#[test]
fn test_timeout_marks_response_stale() {
    let (mut dispatcher, _req_rx, resp_tx) = harness();
    dispatcher.submit(&request()).unwrap().unwrap();

    let err = dispatcher.poll_timeout(TICK).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(dispatcher.state(), DispatchState::Failed);

    // The slow answer finally lands; a fresh exchange must not see it.
    resp_tx.send(encode_response(&move_made()).unwrap()).unwrap();
    dispatcher.submit(&request()).unwrap().unwrap();
    assert_eq!(dispatcher.poll_timeout(TICK).unwrap_err().kind(), ErrorKind::Timeout);
}

#[test]
fn test_abandon_drops_the_late_response() {
    let (mut dispatcher, _req_rx, resp_tx) = harness();
    dispatcher.submit(&request()).unwrap().unwrap();

    dispatcher.abandon();
    assert_eq!(dispatcher.state(), DispatchState::Idle);

    resp_tx.send(encode_response(&move_made()).unwrap()).unwrap();
    // The abandoned answer is drained, not delivered.
    assert_eq!(dispatcher.poll_timeout(TICK).unwrap(), None);

    // And the next exchange works normally.
    dispatcher.submit(&request()).unwrap().unwrap();
    resp_tx.send(encode_response(&move_made()).unwrap()).unwrap();
    assert_eq!(dispatcher.poll_timeout(TICK).unwrap(), Some(move_made()));
}

#[test]
fn test_abandon_without_request_is_a_no_op() {
    let (mut dispatcher, _req_rx, resp_tx) = harness();
    dispatcher.abandon();
    assert_eq!(dispatcher.state(), DispatchState::Idle);

    // No stale slot was recorded, so a real response still gets through.
    dispatcher.submit(&request()).unwrap().unwrap();
    resp_tx.send(encode_response(&move_made()).unwrap()).unwrap();
    assert_eq!(dispatcher.poll_timeout(TICK).unwrap(), Some(move_made()));
}

#[test]
fn test_disconnected_worker_is_a_protocol_error() {
    let (mut dispatcher, _req_rx, resp_tx) = harness();
    dispatcher.submit(&request()).unwrap().unwrap();
    drop(resp_tx);

    let err = dispatcher.poll_timeout(TICK).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[test]
fn test_submit_after_worker_exit_is_a_protocol_error() {
    let (mut dispatcher, req_rx, _resp_tx) = harness();
    drop(req_rx);

    let err = dispatcher.submit(&request()).unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(dispatcher.state(), DispatchState::Failed);
}

#[test]
fn test_passthrough_while_stale_does_not_unmask_the_stale_move() {
    let (mut dispatcher, _req_rx, resp_tx) = harness();
    dispatcher.submit(&request()).unwrap().unwrap();
    assert_eq!(dispatcher.poll_timeout(TICK).unwrap_err().kind(), ErrorKind::Timeout);

    dispatcher.submit(&request()).unwrap().unwrap();

    // UI traffic lands between the two answers; it must not consume the
    // stale slot and promote the first request's move to a live answer.
    let tick = SearchResponse::Tick {
        timestamp: chrono::Utc::now(),
    };
    resp_tx.send(encode_response(&tick).unwrap()).unwrap();
    resp_tx.send(encode_response(&move_at(0, 0)).unwrap()).unwrap();
    resp_tx.send(encode_response(&move_at(1, 1)).unwrap()).unwrap();

    assert!(matches!(
        dispatcher.poll_timeout(TICK).unwrap(),
        Some(SearchResponse::Tick { .. })
    ));
    // The first request's late move is dropped; the second request gets
    // its own answer.
    assert_eq!(dispatcher.poll_timeout(TICK).unwrap(), Some(move_at(1, 1)));
    assert_eq!(dispatcher.state(), DispatchState::Applying);
}

#[test]
fn test_passthrough_is_delivered_without_a_live_request() {
    let (mut dispatcher, _req_rx, resp_tx) = harness();
    let resize = SearchResponse::Resize {
        window_size: serde_json::json!([640, 480]),
    };
    resp_tx.send(encode_response(&resize).unwrap()).unwrap();

    assert_eq!(dispatcher.poll_timeout(TICK).unwrap(), Some(resize));
    assert_eq!(dispatcher.state(), DispatchState::Idle);
}

#[test]
fn test_passthrough_does_not_settle_the_request() {
    let (mut dispatcher, _req_rx, resp_tx) = harness();
    dispatcher.submit(&request()).unwrap().unwrap();

    let tick = SearchResponse::Tick {
        timestamp: chrono::Utc::now(),
    };
    resp_tx.send(encode_response(&tick).unwrap()).unwrap();
    let response = dispatcher.poll_timeout(TICK).unwrap();
    assert!(matches!(response, Some(SearchResponse::Tick { .. })));
    // Still waiting for the move itself.
    assert_eq!(dispatcher.state(), DispatchState::AwaitingResult);

    resp_tx.send(encode_response(&move_made()).unwrap()).unwrap();
    assert_eq!(dispatcher.poll_timeout(TICK).unwrap(), Some(move_made()));
    assert_eq!(dispatcher.state(), DispatchState::Applying);
}
