use crate::entry::Runlevel;

/// Event as delivered by the control channel, before it becomes a `LogEntry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub event_type: String,
    /// Unix timestamp of arrival.
    pub arrived_at: i64,
    /// Everything after the event type on the wire.
    pub body: String,
    pub payload: EventPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    Log { runlevel: Runlevel, message: String },
    Bandwidth { read: u64, written: u64 },
    Circuit,
    NetworkStatus,
    NewConsensus,
    Guard,
    Other,
}

impl RawEvent {
    pub fn new(event_type: impl Into<String>, arrived_at: i64, body: impl Into<String>) -> Self {
        let event_type = event_type.into().to_ascii_uppercase();
        let body = body.into();
        let payload = EventPayload::classify(&event_type, &body);

        Self {
            event_type,
            arrived_at,
            body,
            payload,
        }
    }

    /// Parses an asynchronous event line such as `650 BW 1024 2048` or
    /// `NOTICE Bootstrapped 100%`. The `650` status code is optional.
    pub fn from_line(line: &str, arrived_at: i64) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let line = line
            .strip_prefix("650 ")
            .or_else(|| line.strip_prefix("650-"))
            .unwrap_or(line)
            .trim_start();

        let (event_type, body) = match line.split_once(' ') {
            Some((event_type, body)) => (event_type, body),
            None => (line, ""),
        };

        if event_type.is_empty() {
            return None;
        }

        Some(Self::new(event_type, arrived_at, body))
    }
}

impl EventPayload {
    fn classify(event_type: &str, body: &str) -> Self {
        if let Some(runlevel) = Runlevel::from_name(event_type) {
            return EventPayload::Log {
                runlevel,
                message: body.to_string(),
            };
        }

        match event_type {
            "BW" => {
                let mut fields = body.split_whitespace().map(str::parse::<u64>);
                match (fields.next(), fields.next()) {
                    (Some(Ok(read)), Some(Ok(written))) => EventPayload::Bandwidth { read, written },
                    _ => EventPayload::Other,
                }
            }
            "CIRC" => EventPayload::Circuit,
            "NS" => EventPayload::NetworkStatus,
            "NEWCONSENSUS" => EventPayload::NewConsensus,
            "GUARD" => EventPayload::Guard,
            _ => EventPayload::Other,
        }
    }
}
