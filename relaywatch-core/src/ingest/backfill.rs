use crate::entry::{LogEntry, Runlevel};
use crate::ingest::constants::STARTUP_MARKER;
use crate::ingest::parse::{infer_timestamp, split_log_line};
use crate::ingest::tail::read_lines;
use crate::source::{EventSource, LogSinkConfig};
use chrono::{DateTime, Local};
use std::collections::BTreeSet;
use std::time::Instant;

/// What a backfill should look for and how much work it may do.
#[derive(Debug, Clone, Copy)]
pub struct BackfillRequest<'a> {
    /// Accepted categories. Only daemon runlevels can match a log-file line.
    pub categories: &'a BTreeSet<String>,
    /// Maximum lines read from the end of the file, `None` for the whole file.
    pub read_limit: Option<usize>,
    /// Maximum entries returned, `None` for no cap.
    pub add_limit: Option<usize>,
}

/// How the buffer is prepopulated when the daemon (re)connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackfillSettings {
    pub enabled: bool,
    pub read_limit: Option<usize>,
    pub add_limit: Option<usize>,
}

/// Entries recovered from the daemon's log file, newest first.
///
/// Every failure is soft: it is logged and yields an empty listing.
pub fn read_log_file_entries(
    source: &dyn EventSource,
    request: BackfillRequest<'_>,
) -> Vec<LogEntry> {
    let started = Instant::now();

    let runlevels = accepted_runlevels(request.categories);
    if runlevels.is_empty() {
        return Vec::new();
    }

    let Some(sink) = source.log_sink() else {
        tracing::debug!("daemon has no log file, nothing to backfill");
        return Vec::new();
    };

    let read_limit =
        effective_read_limit(&sink, &runlevels, request.read_limit, request.add_limit);

    let lines = match read_lines(&sink.path, read_limit) {
        Ok(lines) if !lines.is_empty() => lines,
        Ok(_) => {
            tracing::warn!(path = %sink.path.display(), "daemon log file is empty");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!(
                path = %sink.path.display(),
                error = %err,
                "unable to read daemon log file"
            );
            return Vec::new();
        }
    };

    let entries = entries_from_lines(&lines, &runlevels, request.add_limit, Local::now());

    tracing::info!(
        entries = entries.len(),
        path = %sink.path.display(),
        read_limit = ?read_limit,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "read entries from daemon log file"
    );

    entries
}

/// Walks `lines` (oldest first, as read) backwards and builds entries for the
/// accepted runlevels until the startup marker or the entry cap.
pub fn entries_from_lines(
    lines: &[String],
    runlevels: &BTreeSet<Runlevel>,
    add_limit: Option<usize>,
    now: DateTime<Local>,
) -> Vec<LogEntry> {
    let mut entries = Vec::new();

    for line in lines.iter().rev() {
        if add_limit.is_some_and(|limit| entries.len() >= limit) {
            break;
        }

        let Some(parsed) = split_log_line(line) else {
            continue;
        };

        let runlevel = Runlevel::from_name(&parsed.category).filter(|r| runlevels.contains(r));

        if let Some(runlevel) = runlevel {
            match infer_timestamp(&parsed.stamp, now) {
                Some(ts) => {
                    let entry =
                        LogEntry::new(ts, runlevel.as_str(), parsed.message, runlevel.color());
                    entries.push(entry.sanitized());
                }
                None => {
                    tracing::debug!(stamp = %parsed.stamp, "skipping line with unparsable timestamp")
                }
            }
        }

        if line.contains(STARTUP_MARKER) {
            break;
        }
    }

    entries
}

fn accepted_runlevels(categories: &BTreeSet<String>) -> BTreeSet<Runlevel> {
    Runlevel::ALL
        .into_iter()
        .filter(|r| categories.contains(r.as_str()))
        .collect()
}

/// When every runlevel the file records is accepted, each line becomes an entry, so
/// reading more lines than the entry cap is wasted work.
pub(crate) fn effective_read_limit(
    sink: &LogSinkConfig,
    runlevels: &BTreeSet<Runlevel>,
    read_limit: Option<usize>,
    add_limit: Option<usize>,
) -> Option<usize> {
    let Some(add_limit) = add_limit else {
        return read_limit;
    };

    if read_limit.is_some_and(|read| read <= add_limit) {
        return read_limit;
    }

    match sink.range {
        Some(range) if range.iter().all(|r| runlevels.contains(&r)) => Some(add_limit),
        _ => read_limit,
    }
}
