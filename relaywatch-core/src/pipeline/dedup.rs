use crate::entry::LogEntry;
use crate::pipeline::DedupError;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Wall-clock budget for one deduplication pass.
pub const DEDUP_BUDGET: Duration = Duration::from_millis(100);

/// An entry standing in for itself plus `duplicates` collapsed copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupEntry {
    pub entry: LogEntry,
    pub duplicates: usize,
}

impl DedupEntry {
    pub fn single(entry: LogEntry) -> Self {
        Self {
            entry,
            duplicates: 0,
        }
    }
}

/// Per-category patterns for messages that should be treated as equal even when
/// their text differs.
///
/// A pattern matches when both messages start with it. A leading `*` makes the
/// rest of the pattern a substring test instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonMessages(HashMap<String, Vec<String>>);

impl CommonMessages {
    pub fn new(patterns: HashMap<String, Vec<String>>) -> Self {
        Self(
            patterns
                .into_iter()
                .map(|(category, messages)| (category.to_ascii_uppercase(), messages))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn matches(&self, category: &str, a: &str, b: &str) -> bool {
        let Some(patterns) = self.0.get(category) else {
            return false;
        };

        patterns.iter().any(|pattern| match pattern.strip_prefix('*') {
            Some(fragment) => a.contains(fragment) && b.contains(fragment),
            None => a.starts_with(pattern.as_str()) && b.starts_with(pattern.as_str()),
        })
    }
}

fn is_duplicate(entry: &LogEntry, other: &LogEntry, common: &CommonMessages) -> bool {
    entry.category() == other.category()
        && (entry.message() == other.message()
            || common.matches(entry.category(), entry.message(), other.message()))
}

/// Collapses duplicates in a listing that may contain `DAYBREAK` entries.
///
/// Each remaining entry absorbs the later entries equal to it, up to the next
/// day marker. The elapsed time is checked after each entry; going over `budget`
/// fails the whole pass, there is no partial result.
pub fn deduplicate(
    entries: &[LogEntry],
    common: &CommonMessages,
    budget: Duration,
) -> Result<Vec<DedupEntry>, DedupError> {
    let started = Instant::now();
    let mut absorbed = vec![false; entries.len()];
    let mut collapsed = Vec::new();

    for (i, entry) in entries.iter().enumerate() {
        if absorbed[i] {
            continue;
        }

        let mut duplicates = 0;
        for (j, other) in entries.iter().enumerate().skip(i + 1) {
            if other.is_daybreak() {
                break;
            }
            if !absorbed[j] && is_duplicate(entry, other, common) {
                absorbed[j] = true;
                duplicates += 1;
            }
        }

        if started.elapsed() > budget {
            return Err(DedupError::Timeout { budget });
        }

        collapsed.push(DedupEntry {
            entry: entry.clone(),
            duplicates,
        });
    }

    Ok(collapsed)
}
