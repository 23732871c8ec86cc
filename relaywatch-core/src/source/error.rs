use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("daemon rejected event type '{event_type}': {reason}")]
    Rejected { event_type: String, reason: String },

    #[error("control channel is closed")]
    Closed,
}

impl SourceError {
    pub fn rejected(event_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            event_type: event_type.into(),
            reason: reason.into(),
        }
    }
}
