use crate::buffer::Snapshot;
use crate::entry::{LogEntry, local_day, today};
use std::collections::VecDeque;

/// Newest-first store of accepted entries.
///
/// Invariants, restored after every mutation:
/// - `len() <= capacity`
/// - with a non-zero TTL, no entry is more than `ttl_days` local days old
///
/// Entries are kept in insertion order. Backfilled entries may interleave with
/// live ones, so the order is not guaranteed to follow timestamps.
#[derive(Debug)]
pub struct EventBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    ttl_days: u32,
    snapshot: Option<Snapshot>,
}

impl EventBuffer {
    pub fn new(capacity: usize, ttl_days: u32) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
            ttl_days,
            snapshot: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl_days(&self) -> u32 {
        self.ttl_days
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest entry first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        self.trim();
    }

    /// Swaps in a whole new listing (newest-first), as done after a backfill.
    pub fn replace(&mut self, entries: Vec<LogEntry>) {
        self.entries = VecDeque::from(entries);
        self.trim();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.snapshot = None;
    }

    pub fn trim(&mut self) {
        self.trim_at(today());
    }

    /// Drops entries past capacity, then entries older than the TTL relative to
    /// the local day `current_day`. Age is scanned from the oldest end and stops at
    /// the first entry within the TTL.
    pub fn trim_at(&mut self, current_day: i64) {
        self.entries.truncate(self.capacity);

        if self.ttl_days > 0 {
            let ttl = i64::from(self.ttl_days);
            while let Some(oldest) = self.entries.back() {
                if current_day - local_day(oldest.timestamp()) > ttl {
                    self.entries.pop_back();
                } else {
                    break;
                }
            }
        }

        self.snapshot = None;
    }

    /// Copy of the current contents. Repeated calls without an intervening
    /// mutation return the same snapshot.
    pub fn snapshot(&mut self) -> Snapshot {
        self.snapshot
            .get_or_insert_with(|| self.entries.iter().cloned().collect())
            .clone()
    }
}
