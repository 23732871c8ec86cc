use crate::buffer::EventBuffer;
use crate::conf::LogConfig;
use crate::engine::EngineError;
use crate::entry::LogEntry;
use crate::events::{InvalidEventFlags, expand_events};
use crate::ingest::BackfillSettings;
use crate::pipeline::{FilterEngine, FilterError, Pipeline};
use crate::router::{EngineLogReceiver, EventRouter, SinkError};
use crate::scheduler::{RedrawScheduler, RedrawSignal, RefreshTarget};
use crate::source::{EventSource, RawEvent, SourceState};
use crate::view::{ExportError, FilterOptions, LogView, Renderer, expand_home};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// State the scheduler thread repaints from.
struct EngineShared {
    router: Arc<EventRouter>,
    renderer: Arc<dyn Renderer>,
    backfill: BackfillSettings,
}

impl RefreshTarget for EngineShared {
    fn is_paused(&self) -> bool {
        self.router.view().is_paused()
    }

    fn refresh(&self) {
        let events = self.router.subscriptions();
        self.router.view().render(self.renderer.as_ref(), &events);
    }

    fn repopulate(&self) {
        self.router.repopulate(&self.backfill);
    }
}

/// The event panel: buffer, router, pipeline and redraw scheduler.
///
/// Every method takes `&self`, so the engine can be shared between the thread
/// feeding it events and the one handling user input.
pub struct LogEngine {
    shared: Arc<EngineShared>,
    signal: Arc<RedrawSignal>,
    scheduler: Mutex<Option<RedrawScheduler>>,
}

impl LogEngine {
    /// Builds the engine from `config`, backfills from the daemon's log file when
    /// enabled, and starts repainting onto `renderer`.
    pub fn start(
        config: &LogConfig,
        source: Arc<dyn EventSource>,
        renderer: Arc<dyn Renderer>,
    ) -> Result<Self, EngineError> {
        let mut config = config.clone();
        config.normalize();
        let categories = config.event_categories()?;

        let view = Arc::new(LogView::new(
            EventBuffer::new(config.cache_size, config.entry_duration_days),
            FilterEngine::with_patterns(config.regex.iter().map(String::as_str)),
            Pipeline::new(config.common_messages()),
            config.view_settings(),
            config.show_duplicate_entries,
        ));

        let signal = Arc::new(RedrawSignal::new());
        let router = Arc::new(EventRouter::new(view, source, Arc::clone(&signal)));
        router.set_subscriptions(&categories);

        if let Some(path) = &config.log_file {
            if let Err(err) = router.attach_sink(&expand_home(path)) {
                tracing::error!(error = %err, "unable to save events to log file");
            }
        }

        let backfill = config.backfill_settings();
        if backfill.enabled {
            router.repopulate(&backfill);
        }

        let shared = Arc::new(EngineShared {
            router,
            renderer,
            backfill,
        });

        let target: Arc<dyn RefreshTarget> = shared.clone();
        let scheduler =
            RedrawScheduler::spawn(Arc::clone(&signal), target, config.refresh_interval())
                .map_err(EngineError::Spawn)?;
        signal.request_refresh();

        tracing::info!(
            events = categories.len(),
            entries = shared.router.view().len(),
            "event panel started"
        );

        Ok(Self {
            shared,
            signal,
            scheduler: Mutex::new(Some(scheduler)),
        })
    }

    pub fn router(&self) -> &Arc<EventRouter> {
        &self.shared.router
    }

    pub fn view(&self) -> &Arc<LogView> {
        self.shared.router.view()
    }

    pub fn subscriptions(&self) -> Arc<BTreeSet<String>> {
        self.shared.router.subscriptions()
    }

    /// Registers the engine's own diagnostics as they arrive. The forwarding
    /// thread stops with the first entry received after the engine is dropped.
    pub fn forward_engine_logs(&self, receiver: EngineLogReceiver) -> io::Result<()> {
        receiver.forward_to(&self.shared.router).map(drop)
    }

    pub fn attach_sink(&self, path: &Path) -> Result<(), SinkError> {
        self.shared.router.attach_sink(&expand_home(path))
    }

    /// Hands a control-channel event to the router.
    pub fn accept(&self, raw: RawEvent) -> bool {
        self.shared.router.accept(raw)
    }

    pub fn register(&self, entry: LogEntry) -> bool {
        self.shared.router.register(entry)
    }

    pub fn source_state_changed(&self, state: SourceState) {
        match state {
            SourceState::Init => {
                tracing::info!("daemon connected, repopulating events");
                self.signal.reconnect();
            }
            SourceState::Closed => tracing::info!("daemon control connection closed"),
        }
    }

    pub fn set_filter(&self, pattern: Option<&str>) -> Result<(), FilterError> {
        let result = self.view().set_filter(pattern);
        self.repaint();
        result
    }

    pub fn remember_filter(&self, pattern: &str) -> Result<(), FilterError> {
        let result = self.view().remember_filter(pattern);
        self.repaint();
        result
    }

    pub fn forget_filter(&self, pattern: &str) {
        self.view().forget_filter(pattern);
        self.repaint();
    }

    pub fn filter_options(&self) -> FilterOptions {
        let options = self.view().filter_options();
        self.repaint();
        options
    }

    pub fn set_show_duplicates(&self, visible: bool) {
        self.view().set_show_duplicates(visible);
        self.repaint();
    }

    pub fn toggle_duplicates(&self) -> bool {
        let visible = self.view().toggle_duplicates();
        self.repaint();
        visible
    }

    /// Replaces the logged event types with those selected by `flags`. Returns
    /// the set the daemon actually accepted.
    pub fn set_logged_events(&self, flags: &str) -> Result<Arc<BTreeSet<String>>, InvalidEventFlags> {
        let requested = expand_events(flags)?;
        let current = self.subscriptions();
        if *current == requested {
            return Ok(current);
        }

        let effective = self.shared.router.set_subscriptions(&requested);
        self.repaint();
        Ok(effective)
    }

    pub fn clear(&self) {
        self.view().clear();
        self.repaint();
    }

    /// Freezes the panel on a copy of the current entries. Events keep being
    /// buffered in the meantime.
    pub fn pause(&self) {
        self.view().pause();
        self.repaint();
    }

    pub fn resume(&self) {
        self.view().resume();
        self.repaint();
    }

    pub fn is_paused(&self) -> bool {
        self.view().is_paused()
    }

    pub fn scroll_to(&self, position: usize) {
        self.view().scroll_to(position);
        self.repaint();
    }

    /// Writes the entries on screen to `path`. Returns how many were written.
    pub fn save_snapshot(&self, path: &Path) -> Result<usize, ExportError> {
        let result = self.view().save_snapshot(&expand_home(path));
        self.repaint();
        result
    }

    /// Stops the scheduler and waits for its thread. Idempotent.
    pub fn halt(&self) {
        if let Some(mut scheduler) = self.scheduler.lock().take() {
            scheduler.halt();
            tracing::debug!("event panel halted");
        }
    }

    fn repaint(&self) {
        self.signal.request_refresh();
    }
}

impl Drop for LogEngine {
    fn drop(&mut self) {
        self.halt();
    }
}
