use crate::entry::LogEntry;
use std::ops::Deref;
use std::sync::Arc;

/// Immutable, point-in-time copy of buffer contents.
///
/// Cheap to clone. Two snapshots are the *same* input for caching purposes only
/// when they share storage, which is what [`Snapshot::same`] checks.
#[derive(Debug, Clone)]
pub struct Snapshot {
    entries: Arc<[LogEntry]>,
}

impl Snapshot {
    pub fn new(entries: Vec<LogEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Identity comparison.
    pub fn same(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl Deref for Snapshot {
    type Target = [LogEntry];

    fn deref(&self) -> &[LogEntry] {
        &self.entries
    }
}

impl FromIterator<LogEntry> for Snapshot {
    fn from_iter<I: IntoIterator<Item = LogEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
