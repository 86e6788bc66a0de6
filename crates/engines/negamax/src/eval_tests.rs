use super::*;
use ttt_core::Position;

#[test]
fn test_win_and_loss_bonuses() {
    let board: Board = "XXX/OO./...".parse().unwrap();
    assert_eq!(evaluate(Player::X, &board), WIN_SCORE);
    assert_eq!(evaluate(Player::O, &board), -WIN_SCORE);
}

#[test]
fn test_draw_scores_zero() {
    let board: Board = "XOX/XXO/OXO".parse().unwrap();
    assert_eq!(evaluate(Player::X, &board), 0);
    assert_eq!(evaluate(Player::O, &board), 0);
}

#[test]
fn test_empty_board_is_neutral() {
    let board = Board::new();
    assert_eq!(evaluate(Player::X, &board), 0);
    assert_eq!(evaluate(Player::O, &board), 0);
}

#[test]
fn test_evaluation_is_antisymmetric() {
    let boards = ["X.O/.X./O..", "XX./O../...", ".O./.X./X.O"];
    for layout in boards {
        let board: Board = layout.parse().unwrap();
        assert_eq!(
            evaluate(Player::X, &board),
            -evaluate(Player::O, &board),
            "{layout}"
        );
    }
}

#[test]
fn test_center_beats_corner_beats_edge() {
    let empty = Board::new();
    let center = evaluate(Player::X, &empty.with_move(Player::X, Position::new(1, 1)));
    let corner = evaluate(Player::X, &empty.with_move(Player::X, Position::new(0, 0)));
    let edge = evaluate(Player::X, &empty.with_move(Player::X, Position::new(0, 1)));
    assert!(center > corner, "center {center} vs corner {corner}");
    assert!(corner > edge, "corner {corner} vs edge {edge}");
}

#[test]
fn test_two_open_marks_outweigh_scattered_singles() {
    // Two in an open row threaten a win and must outscore two scattered
    // marks in closed lines.
    let threat: Board = "XX./.O./..O".parse().unwrap();
    let scattered: Board = "X.O/.O./..X".parse().unwrap();
    assert!(evaluate(Player::X, &threat) > evaluate(Player::X, &scattered));
}
