/// Configuration loading and validation tests
use soundmint_cli::{CliError, SoundmintConfig};
use soundmint_playback::RepeatMode;
use std::collections::HashMap;
use std::io::Write;

/// Environment source that only sees the given variables
fn env(vars: &[(&str, &str)]) -> config::Environment {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();

    config::Environment::with_prefix("SOUNDMINT")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(Some(map))
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = SoundmintConfig::default();
    assert!(config.catalog.listings_url.is_none());
    assert!(config.catalog.static_path.is_none());
    assert_eq!(config.catalog.timeout_secs, 30);
    assert_eq!(config.playback.volume, 50);
    assert_eq!(config.playback.repeat, RepeatMode::Off);
    assert!(!config.playback.shuffle);
    assert_eq!(config.playback.tick_ms, 250);
    assert_eq!(config.playback.speed, 1.0);
}

#[test]
fn test_load_from_file() {
    let file = config_file(
        r#"
[catalog]
listings_url = "https://market.example/listings"
timeout_secs = 5

[playback]
volume = 80
repeat = "playlist"
shuffle = true
shuffle_seed = 42
"#,
    );

    let config = SoundmintConfig::load_with_env(Some(file.path()), env(&[])).unwrap();
    config.validate().unwrap();

    assert_eq!(
        config.catalog.listings_url.as_deref(),
        Some("https://market.example/listings")
    );
    assert_eq!(config.catalog.timeout_secs, 5);
    assert_eq!(config.playback.volume, 80);
    assert_eq!(config.playback.repeat, RepeatMode::Playlist);
    assert!(config.playback.shuffle);
    assert_eq!(config.playback.shuffle_seed, Some(42));
    assert_eq!(config.playback.tick_ms, 250);

    let playback = config.playback.playback_config();
    assert_eq!(playback.volume, 80);
    assert_eq!(playback.shuffle_seed, Some(42));
}

#[test]
fn test_environment_overrides_file() {
    let file = config_file(
        r#"
[catalog]
static_path = "/srv/catalog.json"

[playback]
volume = 80
"#,
    );

    let config = SoundmintConfig::load_with_env(
        Some(file.path()),
        env(&[
            ("SOUNDMINT_PLAYBACK__VOLUME", "20"),
            ("SOUNDMINT_PLAYBACK__REPEAT", "one"),
            ("SOUNDMINT_PLAYBACK__SPEED", "4.0"),
        ]),
    )
    .unwrap();

    assert_eq!(config.playback.volume, 20);
    assert_eq!(config.playback.repeat, RepeatMode::One);
    assert_eq!(config.playback.speed, 4.0);
    assert_eq!(
        config.catalog.static_path.as_deref(),
        Some(std::path::Path::new("/srv/catalog.json"))
    );
}

#[test]
fn test_environment_only() {
    let config = SoundmintConfig::load_with_env(
        None,
        env(&[("SOUNDMINT_CATALOG__LISTINGS_URL", "http://localhost:8545/listings")]),
    )
    .unwrap();

    assert_eq!(
        config.catalog.listings_url.as_deref(),
        Some("http://localhost:8545/listings")
    );
    config.validate().unwrap();
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = SoundmintConfig::load_with_env(Some(&dir.path().join("nope.toml")), env(&[]));
    assert!(matches!(result, Err(CliError::Config(_))));
}

#[test]
fn test_catalog_source_required() {
    let config = SoundmintConfig::default();
    match config.validate() {
        Err(CliError::Config(msg)) => assert!(msg.contains("catalog")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_both_catalog_sources_rejected() {
    let mut config = SoundmintConfig::default();
    config.catalog.listings_url = Some("https://market.example/listings".to_string());
    config.catalog.static_path = Some("catalog.json".into());
    assert!(matches!(config.validate(), Err(CliError::Config(_))));
}

#[test]
fn test_invalid_playback_settings_rejected() {
    let mut config = SoundmintConfig::default();
    config.catalog.static_path = Some("catalog.json".into());
    config.validate().unwrap();

    config.playback.volume = 101;
    assert!(config.validate().is_err());
    config.playback.volume = 100;

    config.playback.speed = 0.0;
    assert!(config.validate().is_err());
    config.playback.speed = f64::NAN;
    assert!(config.validate().is_err());
    config.playback.speed = 1.0;

    config.playback.tick_ms = 0;
    assert!(config.validate().is_err());
}
