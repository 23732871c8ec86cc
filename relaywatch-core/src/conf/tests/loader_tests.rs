use crate::conf::{ConfigError, LogConfig, load_config, parse_config};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn empty_file_yields_defaults() {
    let config = parse_config(Path::new("relaywatch.yaml"), "\n  \n").unwrap();

    assert_eq!(config, LogConfig::default());
    assert_eq!(config.events, "N3");
    assert_eq!(config.cache_size, 1000);
    assert!(config.show_date_dividers);
}

#[test]
fn partial_file_keeps_other_defaults() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("relaywatch.yaml");
    fs::write(
        &path,
        r#"
log_file: /var/log/relaywatch/events.log
show_duplicate_entries: true
prepopulate_read_limit: 0
regex:
  - "circ.*built"
common_messages:
  notice:
    - "Bootstrapped "
    - "*was unreachable"
"#,
    )
    .unwrap();

    // Act
    let config = load_config(&path).unwrap();

    // Assert
    assert_eq!(
        config.log_file,
        Some(PathBuf::from("/var/log/relaywatch/events.log"))
    );
    assert!(config.show_duplicate_entries);
    assert_eq!(config.regex, vec!["circ.*built".to_string()]);
    assert_eq!(config.common_messages["notice"].len(), 2);
    assert_eq!(config.max_refresh_rate_ms, 300);

    let backfill = config.backfill_settings();
    assert!(backfill.enabled);
    assert_eq!(backfill.read_limit, None);
    assert_eq!(backfill.add_limit, Some(1000));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempdir().unwrap();

    let err = load_config(&dir.path().join("absent.yaml")).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn unknown_keys_are_rejected() {
    let err = parse_config(Path::new("relaywatch.yaml"), "cache_sise: 5000\n").unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("relaywatch.yaml"));
}

#[test]
fn events_are_expanded() {
    let config = LogConfig {
        events: "bW".to_string(),
        ..LogConfig::default()
    };

    let categories: Vec<String> = config.event_categories().unwrap().into_iter().collect();

    assert_eq!(categories, vec!["BW", "ERR", "WARN"]);
}

#[test]
fn bad_event_flags_are_reported() {
    let config = LogConfig {
        events: "nZ?".to_string(),
        ..LogConfig::default()
    };

    let err = config.event_categories().unwrap_err();

    assert!(matches!(err, ConfigError::InvalidEvents { .. }));
}

#[test]
fn dump_round_trips_through_yaml() {
    let config = LogConfig {
        log_file: Some(PathBuf::from("events.log")),
        ..LogConfig::default()
    };

    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed = parse_config(Path::new("dump.yaml"), &yaml).unwrap();

    assert_eq!(parsed, config);
}
