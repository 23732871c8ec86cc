//! Event types the engine knows about and the flag shorthand used to select them.

mod flags;

pub use flags::{EVENT_LISTING, EVENT_TYPES, InvalidEventFlags, UNKNOWN, expand_events, is_known_event_type};
