use std::time::Duration;

/// Shortest sleep between two checks, regardless of the refresh period.
pub const MIN_INTERVAL: Duration = Duration::from_millis(50);
