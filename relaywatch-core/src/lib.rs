//! Event-log engine behind the relay dashboard's event panel.
//!
//! Live events come in through an [`EventSource`](source::EventSource), are
//! routed into a bounded buffer, and are painted by a rate-limited scheduler
//! after running through daybreak annotation, deduplication and filtering.

pub mod buffer;
pub mod conf;
pub mod engine;
pub mod entry;
pub mod events;
pub mod ingest;
pub mod logging;
pub mod pipeline;
pub mod router;
pub mod scheduler;
pub mod source;
pub mod view;

pub use engine::{EngineError, LogEngine};
