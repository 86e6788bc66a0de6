use super::*;

#[test]
fn test_other_player_flips() {
    assert_eq!(Player::X.other(), Player::O);
    assert_eq!(Player::O.other(), Player::X);
}

#[test]
fn test_index_round_trip() {
    for i in 0..9 {
        let pos = Position::from_index(i).unwrap();
        assert_eq!(pos.index(), i);
        assert!(pos.in_bounds());
    }
    assert!(Position::from_index(9).is_none());
}

#[test]
fn test_coord_round_trip() {
    assert_eq!(coord_to_pos("a1"), Some(Position::new(0, 0)));
    assert_eq!(coord_to_pos("b2"), Some(Position::new(1, 1)));
    assert_eq!(coord_to_pos("c3"), Some(Position::new(2, 2)));
    assert_eq!(pos_to_coord(Position::new(2, 0)), "a3");

    assert_eq!(coord_to_pos("d1"), None);
    assert_eq!(coord_to_pos("a4"), None);
    assert_eq!(coord_to_pos("a"), None);
}
