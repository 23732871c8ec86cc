use crate::ingest::constants::{FUTURE_TOLERANCE_SECS, MAX_YEAR_STEPS, PLACEHOLDER_YEAR};
use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone};

/// A log line split into its parts. Nothing is validated beyond the token count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// First three tokens, e.g. `Jul 15 18:29:48.806`.
    pub stamp: String,
    /// Bracketed fourth token without its brackets, uppercased.
    pub category: String,
    /// Remaining tokens joined by single spaces.
    pub message: String,
}

pub fn split_log_line(line: &str) -> Option<LogLine> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 4 {
        return None;
    }

    let bracketed = tokens[3];
    let category = bracketed
        .get(1..bracketed.len().saturating_sub(1))
        .unwrap_or_default()
        .to_ascii_uppercase();

    Some(LogLine {
        stamp: tokens[..3].join(" "),
        category,
        message: tokens[4..].join(" "),
    })
}

/// Resolves a year-less local timestamp (`Jul 15 18:29:48.806`) against `now`.
///
/// The year starts as the current one and is wound back while the result would
/// be more than a minute in the future, or while the candidate year has no
/// `Feb 29`. The current UTC offset is used throughout since the log carries no
/// DST information.
pub fn infer_timestamp(stamp: &str, now: DateTime<Local>) -> Option<i64> {
    let stamp = match stamp.find('.') {
        Some(idx) => &stamp[..idx],
        None => stamp,
    };

    let parsed = NaiveDateTime::parse_from_str(
        &format!("{PLACEHOLDER_YEAR} {stamp}"),
        "%Y %b %d %H:%M:%S",
    )
    .ok()?;

    let offset = *now.offset();
    let latest = now.timestamp() + FUTURE_TOLERANCE_SECS;
    let mut year = now.year();

    for _ in 0..MAX_YEAR_STEPS {
        if let Some(candidate) = parsed.with_year(year) {
            let ts = offset
                .from_local_datetime(&candidate)
                .single()?
                .timestamp();
            if ts <= latest {
                return Some(ts);
            }
        }
        year -= 1;
    }

    None
}
