use crate::buffer::{EventBuffer, Snapshot};
use crate::entry::{LogEntry, today};
use crate::pipeline::{FilterEngine, FilterError, Pipeline, PipelineOptions};
use crate::view::{ExportError, Frame, Renderer, TitleCache, redraw_reason, write_snapshot};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct ViewSettings {
    pub show_date_dividers: bool,
    pub max_lines_per_entry: usize,
}

/// Active filter and the remembered patterns, for building a filter menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub active: Option<String>,
    pub remembered: Vec<String>,
}

struct ViewState {
    buffer: EventBuffer,
    filter: FilterEngine,
    pipeline: Pipeline,
    /// Copy of the buffer taken when the view was paused.
    paused: Option<Snapshot>,
    scroll: usize,
    show_duplicates: bool,
    content_height: usize,
    title: TitleCache,
}

/// Buffer, filter, caches and scroll state of the event panel.
///
/// All of it lives under a single lock that every method takes for its whole
/// read-modify sequence. The lock is never held while calling out to a renderer
/// or doing file IO, so none of the methods need to be reentrant.
pub struct LogView {
    state: Mutex<ViewState>,
    settings: ViewSettings,
}

impl LogView {
    pub fn new(
        buffer: EventBuffer,
        filter: FilterEngine,
        pipeline: Pipeline,
        settings: ViewSettings,
        show_duplicates: bool,
    ) -> Self {
        Self {
            state: Mutex::new(ViewState {
                buffer,
                filter,
                pipeline,
                paused: None,
                scroll: 0,
                show_duplicates,
                content_height: 0,
                title: TitleCache::default(),
            }),
            settings,
        }
    }

    pub fn settings(&self) -> ViewSettings {
        self.settings
    }

    /// Adds a live entry. Returns whether the entry passes the active filter,
    /// i.e. whether it can change what is on screen.
    pub fn append(&self, entry: LogEntry) -> bool {
        let mut state = self.state.lock();
        let visible = state.filter.apply(&entry);
        state.buffer.append(entry);
        visible
    }

    pub fn replace(&self, entries: Vec<LogEntry>) {
        self.state.lock().buffer.replace(entries);
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.buffer.clear();
        state.pipeline.clear_cache();
    }

    pub fn len(&self) -> usize {
        self.state.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current buffer contents, ignoring any pause.
    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().buffer.snapshot()
    }

    pub fn set_filter(&self, pattern: Option<&str>) -> Result<(), FilterError> {
        self.state.lock().filter.set_active(pattern)
    }

    pub fn remember_filter(&self, pattern: &str) -> Result<(), FilterError> {
        self.state.lock().filter.remember(pattern)
    }

    pub fn forget_filter(&self, pattern: &str) {
        self.state.lock().filter.forget(pattern);
    }

    pub fn filter_options(&self) -> FilterOptions {
        let state = self.state.lock();
        FilterOptions {
            active: state.filter.active().map(str::to_string),
            remembered: state.filter.options().to_vec(),
        }
    }

    pub fn show_duplicates(&self) -> bool {
        self.state.lock().show_duplicates
    }

    pub fn set_show_duplicates(&self, visible: bool) {
        self.state.lock().show_duplicates = visible;
    }

    /// Flips duplicate visibility, returning the new setting.
    pub fn toggle_duplicates(&self) -> bool {
        let mut state = self.state.lock();
        state.show_duplicates = !state.show_duplicates;
        state.show_duplicates
    }

    pub fn pause(&self) {
        let mut state = self.state.lock();
        if state.paused.is_none() {
            let copy = state.buffer.snapshot();
            state.paused = Some(copy);
        }
    }

    pub fn resume(&self) {
        self.state.lock().paused = None;
    }

    pub fn is_paused(&self) -> bool {
        self.state.lock().paused.is_some()
    }

    /// Sets the scroll position. It is clamped to the content on the next frame.
    pub fn scroll_to(&self, position: usize) {
        self.state.lock().scroll = position;
    }

    pub fn scroll(&self) -> usize {
        self.state.lock().scroll
    }

    pub fn content_height(&self) -> usize {
        self.state.lock().content_height
    }

    /// Runs the pipeline over the paused copy, or the live buffer, and packages the
    /// result for a `width` x `height` panel.
    pub fn frame(&self, events: &BTreeSet<String>, width: usize, height: usize) -> Frame {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let input = match &state.paused {
            Some(copy) => copy.clone(),
            None => state.buffer.snapshot(),
        };

        let options = PipelineOptions {
            show_dividers: self.settings.show_date_dividers,
            deduplicate: !state.show_duplicates,
            ignore_time: state.paused.is_some(),
            current_day: today(),
        };

        let run = state.pipeline.run(&input, &state.filter, options);
        if let Some(err) = run.dedup_failure {
            tracing::warn!(
                error = %err,
                entries = input.len(),
                "deduplication is too slow for this many entries, showing duplicates instead"
            );
            state.show_duplicates = true;
        }

        let max_scroll = (state.content_height + 1).saturating_sub(height);
        state.scroll = state.scroll.min(max_scroll);

        let title = state
            .title
            .get(events, state.filter.active(), width)
            .to_string();

        Frame {
            title,
            entries: run.entries,
            scroll: state.scroll,
            width,
            height,
            max_lines_per_entry: self.settings.max_lines_per_entry,
        }
    }

    /// Builds a frame at the renderer's size and draws it. If the content height
    /// turned out different enough from the last estimate to misplace the scroll
    /// bar, the frame is rebuilt and drawn once more.
    pub fn render(&self, renderer: &dyn Renderer, events: &BTreeSet<String>) -> usize {
        let (width, height) = renderer.size();

        let frame = self.frame(events, width, height);
        let drawn = renderer.draw(&frame);
        let previous = std::mem::replace(&mut self.state.lock().content_height, drawn);

        let Some(reason) = redraw_reason(previous, drawn, frame.scroll, height) else {
            return drawn;
        };

        tracing::debug!(reason, previous, drawn, "redrawing with corrected content height");
        let frame = self.frame(events, width, height);
        let drawn = renderer.draw(&frame);
        self.state.lock().content_height = drawn;
        drawn
    }

    /// Writes the dated display line of every entry on screen (paused copy or live
    /// buffer, filter applied) to `path`. Returns the number of lines written.
    pub fn save_snapshot(&self, path: &Path) -> Result<usize, ExportError> {
        let lines: Vec<String> = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let input = match &state.paused {
                Some(copy) => copy.clone(),
                None => state.buffer.snapshot(),
            };
            input
                .iter()
                .filter(|entry| state.filter.apply(entry))
                .map(LogEntry::dated_display_message)
                .collect()
        };

        let written = write_snapshot(path, &lines)?;
        tracing::info!(path = %path.display(), entries = written, "saved event snapshot");
        Ok(written)
    }
}
