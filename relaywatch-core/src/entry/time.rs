use chrono::{DateTime, Local, NaiveTime, TimeZone};
use std::time::Duration;

pub const SECONDS_PER_DAY: i64 = 86_400;

pub fn now_timestamp() -> i64 {
    Local::now().timestamp()
}

/// Local wall-clock time of a unix timestamp. Out-of-range values map to the epoch.
pub fn local_datetime(ts: i64) -> DateTime<Local> {
    Local.timestamp_opt(ts, 0).earliest().unwrap_or_default()
}

/// Days since the epoch, counted in local time.
pub fn local_day(ts: i64) -> i64 {
    let offset = i64::from(local_datetime(ts).offset().local_minus_utc());
    (ts + offset).div_euclid(SECONDS_PER_DAY)
}

/// Local day of the current time.
pub fn today() -> i64 {
    local_day(now_timestamp())
}

/// First second of the local day containing `ts`.
pub fn start_of_local_day(ts: i64) -> i64 {
    let dt = local_datetime(ts);
    let midnight = dt.date_naive().and_time(NaiveTime::MIN);

    match Local.from_local_datetime(&midnight).earliest() {
        Some(start) => start.timestamp(),
        // midnight skipped by a DST jump
        None => local_day(ts) * SECONDS_PER_DAY - i64::from(dt.offset().local_minus_utc()),
    }
}

/// Time left until the next local midnight.
pub fn until_next_local_day(now: DateTime<Local>) -> Duration {
    let next_start = now
        .date_naive()
        .succ_opt()
        .map(|d| d.and_time(NaiveTime::MIN))
        .and_then(|midnight| Local.from_local_datetime(&midnight).earliest());

    match next_start {
        Some(start) => (start - now).to_std().unwrap_or(Duration::ZERO),
        None => Duration::from_secs(3600),
    }
}
