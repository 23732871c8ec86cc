use crate::entry::{Color, LogEntry};
use crate::events::is_known_event_type;
use crate::source::{EventPayload, RawEvent};

/// Builds the entry for a control-channel event, picking its color by event kind.
pub fn translate(raw: RawEvent) -> LogEntry {
    let RawEvent {
        event_type,
        arrived_at,
        body,
        payload,
    } = raw;

    let (message, color) = match payload {
        EventPayload::Log { runlevel, message } => (message, runlevel.color()),
        EventPayload::Bandwidth { read, written } => {
            (format!("READ: {read}, WRITTEN: {written}"), Color::Cyan)
        }
        EventPayload::Circuit => (body, Color::Yellow),
        EventPayload::NetworkStatus => (body, Color::Blue),
        EventPayload::NewConsensus => (body, Color::Magenta),
        EventPayload::Guard => (body, Color::Yellow),
        EventPayload::Other if is_known_event_type(&event_type) => (body, Color::White),
        EventPayload::Other => (body, Color::Red),
    };

    LogEntry::new(arrived_at, event_type, message, color)
}
