//! Log entries and the values they are built from.
//!
//! A `LogEntry` is the unit every other part of the engine moves around: the
//! backfill parser and the event router produce them, the buffer stores them
//! newest-first, and the pipeline decorates, collapses and filters them before
//! they reach a renderer.

mod color;
mod runlevel;
mod sanitize;
mod time;
mod types;

pub use color::Color;
pub use runlevel::{ENGINE_PREFIX, Runlevel};
pub use sanitize::printable;
pub use time::{
    SECONDS_PER_DAY, local_datetime, local_day, now_timestamp, start_of_local_day, today,
    until_next_local_day,
};
pub use types::{DAYBREAK, LogEntry};
