//! Recovery of past events from the daemon's own log file.
//!
//! The daemon writes lines like
//!
//! ```text
//! Jul 15 18:29:48.806 [notice] Parsing GEOIP file.
//! ```
//!
//! with no year and no timezone. `backfill` reads the tail of that file, walks it
//! newest line first and turns each accepted line into a `LogEntry`, stopping at
//! the marker the daemon writes when it starts up.

mod backfill;
mod constants;
mod parse;
mod tail;

pub use backfill::{BackfillRequest, BackfillSettings, entries_from_lines, read_log_file_entries};
pub use parse::{LogLine, infer_timestamp, split_log_line};
pub use tail::read_lines;
