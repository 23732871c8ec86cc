use crate::entry::{Color, DAYBREAK, LogEntry, local_day, start_of_local_day};
use crate::pipeline::annotate_daybreaks;
use chrono::{Local, TimeZone};
use pretty_assertions::assert_eq;

fn at(day: u32, hour: u32, msg: &str) -> LogEntry {
    let ts = Local
        .with_ymd_and_hms(2024, 5, day, hour, 0, 0)
        .earliest()
        .unwrap()
        .timestamp();
    LogEntry::new(ts, "NOTICE", msg, Color::Green)
}

fn categories(entries: &[LogEntry]) -> Vec<&str> {
    entries
        .iter()
        .map(|e| if e.is_daybreak() { DAYBREAK } else { e.message() })
        .collect()
}

#[test]
fn empty_input_gives_empty_output() {
    assert!(annotate_daybreaks(&[], 0).is_empty());
}

#[test]
fn markers_separate_days() {
    // Arrange
    let entries = vec![at(3, 12, "c"), at(3, 9, "b"), at(2, 22, "a")];
    let today = local_day(entries[0].timestamp());

    // Act
    let annotated = annotate_daybreaks(&entries, today);

    // Assert
    assert_eq!(categories(&annotated), vec!["c", "b", DAYBREAK, "a"]);
    assert_eq!(
        annotated[2].timestamp(),
        start_of_local_day(entries[2].timestamp())
    );
    assert_eq!(annotated[2].color(), Color::White);
    assert_eq!(annotated[2].message(), "");
}

#[test]
fn newest_entry_gets_marker_when_not_from_today() {
    let entries = vec![at(3, 12, "b"), at(3, 9, "a")];
    let today = local_day(entries[0].timestamp()) + 2;

    let annotated = annotate_daybreaks(&entries, today);

    assert_eq!(categories(&annotated), vec![DAYBREAK, "b", "a"]);
}

#[test]
fn out_of_order_entries_get_a_marker_per_change() {
    let entries = vec![at(3, 12, "c"), at(2, 9, "b"), at(3, 9, "a")];
    let today = local_day(entries[0].timestamp());

    let annotated = annotate_daybreaks(&entries, today);

    assert_eq!(categories(&annotated), vec!["c", DAYBREAK, "b", DAYBREAK, "a"]);
}
