use super::*;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.depth, 9);
    assert_eq!(config.engine_side, Player::O);
    assert_eq!(config.first_player, Player::X);
    assert_eq!(config.watchdog_ms, 2_000);
    assert!(config.color_scheme.is_none());
}

#[test]
fn test_partial_file_keeps_defaults_for_the_rest() {
    let config: Config = toml::from_str("depth = 5\nengine_side = \"X\"\n").unwrap();
    assert_eq!(config.depth, 5);
    assert_eq!(config.engine_side, Player::X);
    assert_eq!(config.first_player, Player::X);
    assert_eq!(config.watchdog_ms, 2_000);
}

#[test]
fn test_passthrough_values_parse_as_opaque_toml() {
    let raw = r#"
        watchdog_ms = 500

        [color_scheme]
        name = "solarized"
        dark = true

        [window_size]
        width = 800
        height = 600
    "#;
    let config: Config = toml::from_str(raw).unwrap();
    assert_eq!(config.watchdog_ms, 500);

    let scheme = config.color_scheme.unwrap();
    assert_eq!(scheme.get("name").and_then(|v| v.as_str()), Some("solarized"));
    assert!(config.window_size.is_some());
}

#[test]
fn test_bad_toml_is_a_parse_error() {
    let err = toml::from_str::<Config>("depth = \"deep\"").unwrap_err();
    assert!(err.to_string().contains("depth"));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let config = Config::load_or_default("/nonexistent/ttt.toml").unwrap();
    assert_eq!(config.depth, 9);
}
