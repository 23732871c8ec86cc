use crate::entry::{LogEntry, local_day, start_of_local_day};

/// Copies a newest-first listing, inserting a `DAYBREAK` entry above the first
/// entry of each local day. The walk starts from `current_day`, so the newest
/// entry only gets a marker when it is not from today.
pub fn annotate_daybreaks(entries: &[LogEntry], current_day: i64) -> Vec<LogEntry> {
    let mut annotated = Vec::with_capacity(entries.len() + 8);
    let mut last_day = current_day;

    for entry in entries {
        let day = local_day(entry.timestamp());
        if day != last_day {
            annotated.push(LogEntry::daybreak(start_of_local_day(entry.timestamp())));
        }

        annotated.push(entry.clone());
        last_day = day;
    }

    annotated
}
