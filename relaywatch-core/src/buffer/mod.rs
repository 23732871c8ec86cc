mod event_buffer;
mod snapshot;

pub use event_buffer::EventBuffer;
pub use snapshot::Snapshot;
