//! Event source fed from stdin.
//!
//! Lines are control-channel events (`650 BW 1024 2048`, `NOTICE Bootstrapped 100%`).
//! `#init` and `#closed` report connection changes. The daemon's log file, if
//! any, is given on the command line since there is no daemon to ask.


use parking_lot::Mutex;
use relaywatch_core::source::{EventSource, LogSinkConfig, RawEvent, SourceError, SourceState};
use std::collections::BTreeSet;

/// A parsed stdin line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Event(RawEvent),
    State(SourceState),
}

/// `None` for blank lines and comments.
pub fn parse_input(line: &str, now: i64) -> Option<Input> {
    let line = line.trim();

    if let Some(directive) = line.strip_prefix('#') {
        return match directive.trim().to_ascii_lowercase().as_str() {
            "init" => Some(Input::State(SourceState::Init)),
            "closed" => Some(Input::State(SourceState::Closed)),
            _ => None,
        };
    }

    if line.is_empty() {
        return None;
    }

    RawEvent::from_line(line, now).map(Input::Event)
}

pub struct PipedSource {
    log_sink: Option<LogSinkConfig>,
    listening: Mutex<BTreeSet<String>>,
}

impl PipedSource {
    pub fn new(log_sink: Option<LogSinkConfig>) -> Self {
        Self {
            log_sink,
            listening: Mutex::new(BTreeSet::new()),
        }
    }

    pub fn listening(&self) -> BTreeSet<String> {
        self.listening.lock().clone()
    }
}

impl EventSource for PipedSource {
    fn log_sink(&self) -> Option<LogSinkConfig> {
        self.log_sink.clone()
    }

    fn unrecognized_event_types(&self) -> Vec<String> {
        Vec::new()
    }

    fn clear_listeners(&self) {
        self.listening.lock().clear();
    }

    fn add_listener(&self, event_type: &str) -> Result<(), SourceError> {
        let well_formed = !event_type.is_empty()
            && event_type
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
        if !well_formed {
            return Err(SourceError::rejected(event_type, "not an event type name"));
        }

        self.listening.lock().insert(event_type.to_string());
        Ok(())
    }
}
