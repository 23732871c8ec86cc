//! The boundary between the engine and the daemon's control channel.
//!
//! The control-channel client itself lives outside this crate. The engine only
//! needs it to deliver events, describe where the daemon writes its log file, and
//! manage which event types it is listening for.

mod error;
mod raw_event;
mod sink_config;

pub use error::SourceError;
pub use raw_event::{EventPayload, RawEvent};
pub use sink_config::{LogSinkConfig, RunlevelRange};

/// Connection status reported by the control channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    /// A (re)connection to a daemon instance. Existing entries belong to a previous
    /// instance and are replaced by a fresh backfill.
    Init,
    Closed,
}

pub trait EventSource: Send + Sync {
    /// Where the daemon writes its log file, if it writes one at all.
    fn log_sink(&self) -> Option<LogSinkConfig>;

    /// Event types the daemon supports that the engine has no flag for.
    fn unrecognized_event_types(&self) -> Vec<String>;

    fn clear_listeners(&self);

    fn add_listener(&self, event_type: &str) -> Result<(), SourceError>;
}
