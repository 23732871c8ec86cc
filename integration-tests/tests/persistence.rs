use integration_tests::harness::{FakeSource, start_engine, test_config};
use pretty_assertions::assert_eq;
use relaywatch_core::conf::LogConfig;
use relaywatch_core::entry::now_timestamp;
use relaywatch_core::router::SinkError;
use relaywatch_core::source::RawEvent;
use relaywatch_core::view::ExportError;
use std::fs;
use tempfile::tempdir;

fn lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn configured_log_file_receives_accepted_events() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("archive/events.log");
    let config = LogConfig {
        log_file: Some(path.clone()),
        ..test_config()
    };
    let (engine, _source, _renderer) = start_engine(&config, FakeSource::new());

    // Act
    engine.accept(RawEvent::new("NOTICE", now_timestamp(), "kept"));
    engine.accept(RawEvent::new("BW", now_timestamp(), "1 2"));
    engine.accept(RawEvent::new("ERR", now_timestamp(), "also kept"));

    // Assert
    let written = lines(&path);
    assert_eq!(written.len(), 2);
    assert!(written[0].ends_with("[NOTICE] kept"));
    assert!(written[1].ends_with("[ERR] also kept"));
}

#[test]
fn sink_can_be_attached_later() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.log");
    let (engine, _source, _renderer) = start_engine(&test_config(), FakeSource::new());
    engine.accept(RawEvent::new("NOTICE", now_timestamp(), "before"));

    engine.attach_sink(&path).unwrap();
    engine.accept(RawEvent::new("NOTICE", now_timestamp(), "after"));

    let written = lines(&path);
    assert_eq!(written.len(), 1);
    assert!(written[0].ends_with("[NOTICE] after"));
}

#[test]
fn sink_in_unwritable_place_is_an_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain-file");
    fs::write(&file, "").unwrap();
    let (engine, _source, _renderer) = start_engine(&test_config(), FakeSource::new());

    let err = engine.attach_sink(&file.join("events.log")).unwrap_err();

    assert!(matches!(err, SinkError::CreateDir { .. }));
}

#[test]
fn snapshot_holds_filtered_paused_view() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshots/panel.txt");
    let (engine, _source, _renderer) = start_engine(&test_config(), FakeSource::new());
    let now = now_timestamp();
    engine.accept(RawEvent::new("NOTICE", now - 2, "circuit 1 built"));
    engine.accept(RawEvent::new("WARN", now - 1, "guard unreachable"));
    engine.accept(RawEvent::new("NOTICE", now, "circuit 2 built"));
    engine.set_filter(Some("circuit")).unwrap();
    engine.pause();
    engine.accept(RawEvent::new("NOTICE", now, "circuit 3 built"));

    // Act
    let written = engine.save_snapshot(&path).unwrap();

    // Assert
    assert_eq!(written, 2);
    let saved = lines(&path);
    assert!(saved[0].ends_with("[NOTICE] circuit 2 built"));
    assert!(saved[1].ends_with("[NOTICE] circuit 1 built"));
}

#[test]
fn snapshot_into_a_file_path_fails() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain-file");
    fs::write(&file, "").unwrap();
    let (engine, _source, _renderer) = start_engine(&test_config(), FakeSource::new());

    let err = engine.save_snapshot(&file.join("panel.txt")).unwrap_err();

    assert!(matches!(err, ExportError::CreateDir { .. }));
}
