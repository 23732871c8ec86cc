use parking_lot::Mutex;
use relaywatch_core::source::{EventSource, LogSinkConfig, RunlevelRange, SourceError};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Stand-in for a daemon's control channel.
///
/// Accepts every listener except the configured rejections and remembers what
/// is being listened for.
#[derive(Default)]
pub struct FakeSource {
    log_sink: Mutex<Option<LogSinkConfig>>,
    unrecognized: Vec<String>,
    rejected: BTreeSet<String>,
    listening: Mutex<BTreeSet<String>>,
    clears: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `path` as the daemon's log file, recording `levels` (e.g. `notice`).
    pub fn with_log_file(self, path: &Path, levels: &str) -> Self {
        self.set_log_file(path, levels);
        self
    }

    pub fn with_unrecognized(mut self, event_types: &[&str]) -> Self {
        self.unrecognized = event_types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn rejecting(mut self, event_types: &[&str]) -> Self {
        self.rejected = event_types.iter().map(|t| t.to_string()).collect();
        self
    }

    /// The daemon restarted with a different log file.
    pub fn set_log_file(&self, path: &Path, levels: &str) {
        *self.log_sink.lock() = Some(LogSinkConfig {
            path: path.to_path_buf(),
            range: RunlevelRange::parse(levels),
        });
    }

    pub fn listening(&self) -> BTreeSet<String> {
        self.listening.lock().clone()
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl EventSource for FakeSource {
    fn log_sink(&self) -> Option<LogSinkConfig> {
        self.log_sink.lock().clone()
    }

    fn unrecognized_event_types(&self) -> Vec<String> {
        self.unrecognized.clone()
    }

    fn clear_listeners(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.listening.lock().clear();
    }

    fn add_listener(&self, event_type: &str) -> Result<(), SourceError> {
        if self.rejected.contains(event_type) {
            return Err(SourceError::rejected(event_type, "unsupported by this daemon"));
        }

        self.listening.lock().insert(event_type.to_string());
        Ok(())
    }
}
