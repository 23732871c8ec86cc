use crate::entry::{LogEntry, Runlevel};
use crate::events::{UNKNOWN, is_known_event_type};
use crate::ingest::{BackfillRequest, BackfillSettings, read_log_file_entries};
use crate::router::{EventSink, SinkError, Subscriptions, normalize_categories, translate};
use crate::scheduler::RedrawSignal;
use crate::source::{EventSource, RawEvent};
use crate::view::LogView;
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

pub struct EventRouter {
    view: Arc<LogView>,
    source: Arc<dyn EventSource>,
    signal: Arc<RedrawSignal>,
    subscriptions: Subscriptions,
    sink: Mutex<Option<EventSink>>,
}

impl EventRouter {
    /// A router accepting nothing until `set_subscriptions` is called.
    pub fn new(
        view: Arc<LogView>,
        source: Arc<dyn EventSource>,
        signal: Arc<RedrawSignal>,
    ) -> Self {
        Self {
            view,
            source,
            signal,
            subscriptions: Subscriptions::new(BTreeSet::new()),
            sink: Mutex::new(None),
        }
    }

    pub fn view(&self) -> &Arc<LogView> {
        &self.view
    }

    pub fn subscriptions(&self) -> Arc<BTreeSet<String>> {
        self.subscriptions.load()
    }

    pub fn is_subscribed(&self, category: &str) -> bool {
        self.subscriptions.contains(category)
    }

    /// Handles an event from the control channel.
    pub fn accept(&self, raw: RawEvent) -> bool {
        self.register(translate(raw))
    }

    /// Stores an entry if its category is subscribed. Returns whether it was kept.
    pub fn register(&self, entry: LogEntry) -> bool {
        if !self.subscriptions.contains(entry.category()) {
            return false;
        }

        let entry = entry.sanitized();
        self.persist(&entry);

        if self.view.append(entry) {
            self.signal.notify();
        }
        true
    }

    /// Starts appending accepted entries to `path`. Replaces any earlier sink.
    pub fn attach_sink(&self, path: &Path) -> Result<(), SinkError> {
        let sink = EventSink::open(path)?;
        tracing::info!(path = %path.display(), "saving events to log file");
        *self.sink.lock() = Some(sink);
        Ok(())
    }

    pub fn has_sink(&self) -> bool {
        self.sink.lock().is_some()
    }

    fn persist(&self, entry: &LogEntry) {
        let mut slot = self.sink.lock();
        let Some(sink) = slot.as_mut() else {
            return;
        };

        if let Err(err) = sink.write(entry) {
            tracing::error!(
                path = %sink.path().display(),
                error = %err,
                "unable to write to log file, no longer saving events"
            );
            *slot = None;
        }
    }

    /// Replaces the subscription set and re-registers daemon listeners.
    ///
    /// `UNKNOWN` stands for every daemon event type without a flag. Types the
    /// daemon refuses are dropped. Returns the set now in effect.
    pub fn set_subscriptions<I, S>(&self, requested: I) -> Arc<BTreeSet<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested = normalize_categories(requested);

        let engine: BTreeSet<String> = Runlevel::ALL
            .iter()
            .map(|r| r.engine_category())
            .filter(|category| requested.contains(category))
            .collect();

        let mut daemon: BTreeSet<String> = requested
            .iter()
            .filter(|category| is_known_event_type(category))
            .cloned()
            .collect();

        if requested.contains(UNKNOWN) {
            daemon.extend(self.source.unrecognized_event_types());
        }

        // Events may arrive as soon as a listener is added, so the new set has
        // to be in place first.
        let writer = self.subscriptions.writer();
        writer.store(daemon.union(&engine).cloned().collect());

        self.source.clear_listeners();
        daemon.retain(|event_type| match self.source.add_listener(event_type) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    event_type = %event_type,
                    error = %err,
                    "unable to listen for event type"
                );
                false
            }
        });

        daemon.extend(engine);
        let effective = writer.store(daemon);
        drop(writer);

        let unsupported: Vec<&String> = requested
            .iter()
            .filter(|category| *category != UNKNOWN && !effective.contains(*category))
            .collect();
        if !unsupported.is_empty() {
            tracing::info!(?unsupported, "some requested event types are not logged");
        }

        effective
    }

    /// Discards the buffer and backfills it from the daemon's log file.
    pub fn repopulate(&self, settings: &BackfillSettings) {
        let entries = if settings.enabled {
            let categories = self.subscriptions();
            read_log_file_entries(
                self.source.as_ref(),
                BackfillRequest {
                    categories: &categories,
                    read_limit: settings.read_limit,
                    add_limit: settings.add_limit,
                },
            )
        } else {
            Vec::new()
        };

        self.view.replace(entries);
    }
}
