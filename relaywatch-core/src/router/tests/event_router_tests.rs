use crate::buffer::EventBuffer;
use crate::entry::{Color, LogEntry, now_timestamp};
use crate::ingest::BackfillSettings;
use crate::pipeline::{CommonMessages, FilterEngine, Pipeline};
use crate::router::{EventRouter, SinkError};
use crate::scheduler::{RedrawSignal, SchedulerPhase};
use crate::source::{EventSource, LogSinkConfig, RawEvent, RunlevelRange, SourceError};
use crate::view::{LogView, ViewSettings};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock, Weak};
use tempfile::tempdir;

#[derive(Default)]
struct FakeSource {
    sink: Option<PathBuf>,
    unrecognized: Vec<String>,
    rejects: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl EventSource for FakeSource {
    fn log_sink(&self) -> Option<LogSinkConfig> {
        self.sink.as_ref().map(|path| LogSinkConfig {
            path: path.clone(),
            range: RunlevelRange::parse("notice"),
        })
    }

    fn unrecognized_event_types(&self) -> Vec<String> {
        self.unrecognized.clone()
    }

    fn clear_listeners(&self) {
        self.calls.lock().push("clear".to_string());
    }

    fn add_listener(&self, event_type: &str) -> Result<(), SourceError> {
        self.calls.lock().push(event_type.to_string());
        if self.rejects.iter().any(|r| r == event_type) {
            return Err(SourceError::rejected(event_type, "unsupported"));
        }
        Ok(())
    }
}

struct Fixture {
    router: EventRouter,
    view: Arc<LogView>,
    signal: Arc<RedrawSignal>,
    source: Arc<FakeSource>,
}

fn new_view() -> Arc<LogView> {
    Arc::new(LogView::new(
        EventBuffer::new(1000, 0),
        FilterEngine::new(),
        Pipeline::new(CommonMessages::default()),
        ViewSettings {
            show_date_dividers: false,
            max_lines_per_entry: 6,
        },
        true,
    ))
}

fn fixture(source: FakeSource) -> Fixture {
    let view = new_view();
    let signal = Arc::new(RedrawSignal::new());
    let source = Arc::new(source);
    let dyn_source: Arc<dyn EventSource> = source.clone();
    let router = EventRouter::new(Arc::clone(&view), dyn_source, Arc::clone(&signal));

    Fixture {
        router,
        view,
        signal,
        source,
    }
}

fn raw(line: &str) -> RawEvent {
    RawEvent::from_line(line, now_timestamp()).unwrap()
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn unsubscribed_events_are_dropped() {
    let f = fixture(FakeSource::default());
    f.router.set_subscriptions(["NOTICE"]);

    assert!(!f.router.accept(raw("BW 1 2")));
    assert!(f.view.is_empty());
    assert_eq!(f.signal.phase(), SchedulerPhase::Idle);
}

#[test]
fn accepted_events_are_buffered_and_signalled() {
    // Arrange
    let f = fixture(FakeSource::default());
    f.router.set_subscriptions(["NOTICE", "BW"]);

    // Act
    let kept = f.router.accept(raw("BW 100 200"));

    // Assert
    assert!(kept);
    let snapshot = f.view.snapshot();
    assert_eq!(snapshot[0].message(), "READ: 100, WRITTEN: 200");
    assert_eq!(snapshot[0].color(), Color::Cyan);
    assert_eq!(f.signal.phase(), SchedulerPhase::Refreshing);
}

#[test]
fn filtered_out_events_do_not_wake_the_scheduler() {
    let f = fixture(FakeSource::default());
    f.router.set_subscriptions(["NOTICE"]);
    f.view.set_filter(Some("circuit")).unwrap();

    assert!(f.router.accept(raw("NOTICE nothing to see")));

    assert_eq!(f.view.len(), 1);
    assert_eq!(f.signal.phase(), SchedulerPhase::Idle);
}

#[test]
fn messages_are_sanitized() {
    let f = fixture(FakeSource::default());
    f.router.set_subscriptions(["WATCH_WARN"]);

    f.router
        .register(LogEntry::new(0, "WATCH_WARN", "esc\u{1b}[2Jape", Color::Yellow));

    assert_eq!(f.view.snapshot()[0].message(), "esc[2Jape");
}

#[test]
fn subscriptions_are_normalized_and_registered() {
    // Arrange
    let f = fixture(FakeSource {
        unrecognized: vec!["HS_DESC".to_string(), "CONF_CHANGED".to_string()],
        rejects: vec!["CONF_CHANGED".to_string(), "ADDRMAP".to_string()],
        ..FakeSource::default()
    });

    // Act
    let effective = f.router.set_subscriptions([
        "error", "WARNING", "ADDRMAP", "UNKNOWN", "WATCH_NOTICE", "BOGUS",
    ]);

    // Assert
    assert_eq!(
        *effective,
        set(&["ERR", "HS_DESC", "WARN", "WATCH_NOTICE"])
    );
    assert_eq!(*f.router.subscriptions(), *effective);
    let calls = f.source.calls.lock().clone();
    assert_eq!(calls.first().map(String::as_str), Some("clear"));
    assert_eq!(calls.len(), 6);
}

#[test]
fn unrecognized_types_are_accepted_in_red() {
    let f = fixture(FakeSource {
        unrecognized: vec!["HS_DESC".to_string()],
        ..FakeSource::default()
    });
    f.router.set_subscriptions(["UNKNOWN"]);

    assert!(f.router.accept(raw("HS_DESC CREATED abc")));

    assert_eq!(f.view.snapshot()[0].color(), Color::Red);
}

#[test]
fn sink_receives_dated_lines() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("saved/events.log");
    let f = fixture(FakeSource::default());
    f.router.set_subscriptions(["NOTICE"]);
    f.router.attach_sink(&path).unwrap();

    // Act
    f.router.accept(raw("NOTICE first"));
    f.router.accept(raw("BW 1 2"));
    f.router.accept(raw("NOTICE second"));

    // Assert
    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("[NOTICE] first"));
    assert!(lines[1].ends_with("[NOTICE] second"));
}

#[test]
fn sink_directory_failure_surfaces() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let f = fixture(FakeSource::default());

    let result = f.router.attach_sink(&blocker.join("events.log"));

    assert!(matches!(result, Err(SinkError::CreateDir { .. })));
    assert!(!f.router.has_sink());
}

#[cfg(target_os = "linux")]
#[test]
fn sink_write_failure_detaches_sink() {
    let f = fixture(FakeSource::default());
    f.router.set_subscriptions(["NOTICE"]);
    f.router.attach_sink(std::path::Path::new("/dev/full")).unwrap();

    f.router.accept(raw("NOTICE no space"));

    assert!(!f.router.has_sink());
    assert_eq!(f.view.len(), 1);
}

#[test]
fn repopulate_replaces_buffer_with_backfill() {
    // Arrange
    let dir = tempdir().unwrap();
    let log = dir.path().join("notices.log");
    fs::write(
        &log,
        "Jan 02 03:04:05.000 [notice] Tor opening log file.\nJan 02 03:04:06.000 [warn] from file\n",
    )
    .unwrap();
    let f = fixture(FakeSource {
        sink: Some(log),
        ..FakeSource::default()
    });
    f.router.set_subscriptions(["NOTICE", "WARN"]);
    f.router.accept(raw("NOTICE live before reconnect"));
    let settings = BackfillSettings {
        enabled: true,
        read_limit: Some(5000),
        add_limit: Some(1000),
    };

    // Act
    f.router.repopulate(&settings);

    // Assert
    let messages: Vec<String> = f
        .view
        .snapshot()
        .iter()
        .map(|e| e.message().to_string())
        .collect();
    assert_eq!(messages, vec!["from file", "Tor opening log file."]);
}

#[test]
fn disabled_backfill_just_clears() {
    let f = fixture(FakeSource::default());
    f.router.set_subscriptions(["NOTICE"]);
    f.router.accept(raw("NOTICE live"));

    f.router.repopulate(&BackfillSettings {
        enabled: false,
        read_limit: None,
        add_limit: None,
    });

    assert!(f.view.is_empty());
}

/// Emits an event for each type as soon as its listener is added.
#[derive(Default)]
struct EagerSource {
    router: OnceLock<Weak<EventRouter>>,
}

impl EventSource for EagerSource {
    fn log_sink(&self) -> Option<LogSinkConfig> {
        None
    }

    fn unrecognized_event_types(&self) -> Vec<String> {
        Vec::new()
    }

    fn clear_listeners(&self) {}

    fn add_listener(&self, event_type: &str) -> Result<(), SourceError> {
        if event_type == "CIRC" {
            return Err(SourceError::rejected(event_type, "unsupported"));
        }
        if let Some(router) = self.router.get().and_then(Weak::upgrade) {
            router.accept(RawEvent::new(event_type, now_timestamp(), "1024 2048"));
        }
        Ok(())
    }
}

#[test]
fn events_arriving_during_registration_are_kept() {
    // Arrange
    let source = Arc::new(EagerSource::default());
    let dyn_source: Arc<dyn EventSource> = source.clone();
    let router = Arc::new(EventRouter::new(
        new_view(),
        dyn_source,
        Arc::new(RedrawSignal::new()),
    ));
    source.router.set(Arc::downgrade(&router)).unwrap();

    // Act
    let effective = router.set_subscriptions(["BW", "CIRC"]);

    // Assert
    assert_eq!(*effective, set(&["BW"]));
    let snapshot = router.view().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].category(), "BW");
    assert_eq!(snapshot[0].message(), "READ: 1024, WRITTEN: 2048");
    assert!(!router.accept(RawEvent::new("CIRC", now_timestamp(), "1 BUILT")));
}
