use crate::conf::{LogConfig, MIN_CACHE_SIZE};
use pretty_assertions::assert_eq;
use std::time::Duration;

#[test]
fn defaults_need_no_changes() {
    let mut config = LogConfig::default();

    let warnings = config.normalize();

    assert!(warnings.is_empty());
    assert_eq!(config, LogConfig::default());
}

#[test]
fn out_of_range_values_are_clamped() {
    // Arrange
    let mut config = LogConfig {
        max_lines_per_entry: 0,
        max_refresh_rate_ms: 1,
        cache_size: 10,
        regex: (0..8).map(|i| format!("pattern{i}")).collect(),
        ..LogConfig::default()
    };

    // Act
    let warnings = config.normalize();

    // Assert
    let keys: Vec<&str> = warnings.iter().map(|w| w.key).collect();
    assert_eq!(
        keys,
        vec!["max_lines_per_entry", "max_refresh_rate_ms", "cache_size", "regex"]
    );
    assert_eq!(config.max_lines_per_entry, 1);
    assert_eq!(config.refresh_interval(), Duration::from_millis(10));
    assert_eq!(config.cache_size, MIN_CACHE_SIZE);
    assert_eq!(config.regex.len(), 5);
    assert_eq!(config.regex[4], "pattern4");
}

#[test]
fn zero_entry_duration_is_kept() {
    let mut config = LogConfig {
        entry_duration_days: 0,
        ..LogConfig::default()
    };

    assert!(config.normalize().is_empty());
    assert_eq!(config.entry_duration_days, 0);
}
