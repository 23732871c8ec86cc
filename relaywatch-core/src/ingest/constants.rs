/// Written by the daemon when it (re)opens its log, i.e. at startup.
pub const STARTUP_MARKER: &str = "opening log file";

/// Any leap year works, it only has to accept `Feb 29`.
pub const PLACEHOLDER_YEAR: i32 = 2012;

/// How far in the future a parsed timestamp may land before the year is wound back.
pub const FUTURE_TOLERANCE_SECS: i64 = 60;

/// Upper bound on year corrections. Leap years are at most eight years apart.
pub const MAX_YEAR_STEPS: usize = 8;

pub const TAIL_CHUNK_SIZE: u64 = 8 * 1024;
