use integration_tests::harness::{
    FakeSource, daemon_line, fixture, start_engine, test_config, write_daemon_log,
};
use pretty_assertions::assert_eq;
use relaywatch_core::conf::LogConfig;
use relaywatch_core::entry::{SECONDS_PER_DAY, now_timestamp};
use relaywatch_core::source::{RawEvent, SourceState};
use tempfile::tempdir;

fn fixture_config() -> LogConfig {
    LogConfig {
        entry_duration_days: 0,
        show_duplicate_entries: true,
        ..test_config()
    }
}

#[test]
fn backfill_stops_at_the_last_startup() {
    // Arrange
    let source = FakeSource::new().with_log_file(&fixture("notices.log"), "info");

    // Act
    let (_engine, _source, renderer) = start_engine(&fixture_config(), source);

    // Assert
    assert!(renderer.wait_for_messages(&[
        "Heartbeat: Tor's uptime is 0:06 hours.",
        "Unable to open stats file",
        "Your system clock just jumped 120 seconds forward.",
        "Bootstrapped 100% (done): Done",
        "Bootstrapped 0% (starting): Starting",
        "Tor 0.4.8.9 opening log file.",
    ]));
}

#[test]
fn runlevels_outside_the_logged_events_are_skipped() {
    let source = FakeSource::new().with_log_file(&fixture("notices.log"), "info");
    let config = LogConfig {
        events: "I".to_string(),
        ..fixture_config()
    };

    let (engine, _source, _renderer) = start_engine(&config, source);

    let categories: Vec<String> = engine
        .view()
        .snapshot()
        .iter()
        .map(|e| e.category().to_string())
        .collect();
    assert_eq!(categories, vec!["NOTICE", "ERR", "WARN", "NOTICE", "INFO", "NOTICE", "NOTICE"]);
}

#[test]
fn disabled_prepopulation_starts_empty() {
    let source = FakeSource::new().with_log_file(&fixture("notices.log"), "info");
    let config = LogConfig {
        prepopulate: false,
        ..fixture_config()
    };

    let (engine, _source, _renderer) = start_engine(&config, source);

    assert!(engine.view().is_empty());
}

#[test]
fn missing_log_file_is_not_fatal() {
    let dir = tempdir().unwrap();
    let source = FakeSource::new().with_log_file(&dir.path().join("absent.log"), "notice");

    let (engine, _source, renderer) = start_engine(&fixture_config(), source);
    engine.accept(RawEvent::new("NOTICE", now_timestamp(), "still running"));

    assert!(renderer.wait_for_messages(&["still running"]));
}

#[test]
fn old_entries_are_dropped_by_age() {
    // Arrange
    let dir = tempdir().unwrap();
    let now = now_timestamp();
    let log = write_daemon_log(
        dir.path(),
        &[
            daemon_line(now - 20 * SECONDS_PER_DAY, "notice", "three weeks ago"),
            daemon_line(now - 60, "notice", "a minute ago"),
        ],
    );
    let source = FakeSource::new().with_log_file(&log, "notice");
    let config = LogConfig {
        entry_duration_days: 7,
        ..test_config()
    };

    // Act
    let (engine, _source, _renderer) = start_engine(&config, source);

    // Assert
    let messages: Vec<String> = engine
        .view()
        .snapshot()
        .iter()
        .map(|e| e.message().to_string())
        .collect();
    assert_eq!(messages, vec!["a minute ago"]);
}

#[test]
fn reconnect_replaces_entries_of_the_old_instance() {
    // Arrange
    let dir = tempdir().unwrap();
    let now = now_timestamp();
    let first = write_daemon_log(
        dir.path(),
        &[daemon_line(now - 120, "notice", "first instance")],
    );
    let (engine, source, renderer) = start_engine(
        &test_config(),
        FakeSource::new().with_log_file(&first, "notice"),
    );
    engine.accept(RawEvent::new("NOTICE", now - 60, "live before restart"));
    assert!(renderer.wait_for_messages(&["live before restart", "first instance"]));

    // Act
    let second_dir = tempdir().unwrap();
    let second = write_daemon_log(
        second_dir.path(),
        &[
            daemon_line(now - 5, "notice", "Tor opening log file."),
            daemon_line(now - 4, "warn", "second instance"),
        ],
    );
    source.set_log_file(&second, "notice");
    engine.source_state_changed(SourceState::Init);

    // Assert
    assert!(renderer.wait_for_messages(&["second instance", "Tor opening log file."]));
}
