//! Entry point for every live event.
//!
//! The router owns the subscription set and is the only writer into the view's
//! buffer. Accepted entries are also appended to the persistent sink when one is
//! attached, and wake the redraw scheduler when they could change the screen.

mod engine_layer;
mod error;
mod event_router;
mod sink;
mod subscriptions;
#[cfg(test)]
mod tests;
mod translate;

pub use engine_layer::{EngineLogLayer, EngineLogReceiver, engine_log_channel};
pub use error::SinkError;
pub use event_router::EventRouter;
pub use sink::EventSink;
pub use subscriptions::{SubscriptionWriter, Subscriptions, normalize_categories};
pub use translate::translate;
