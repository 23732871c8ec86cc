use crate::entry::{LogEntry, Runlevel, now_timestamp};
use crate::router::EventRouter;
use std::fmt::Write as _;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// `tracing` layer turning the engine's own diagnostics into `WATCH_*` entries.
///
/// Entries are handed to a forwarding thread rather than registered inline, so
/// code that logs while holding engine locks never re-enters the router.
pub struct EngineLogLayer {
    sender: Sender<LogEntry>,
}

/// Receiving half of [`engine_log_channel`].
pub struct EngineLogReceiver {
    receiver: Receiver<LogEntry>,
}

pub fn engine_log_channel() -> (EngineLogLayer, EngineLogReceiver) {
    let (sender, receiver) = mpsc::channel();
    (EngineLogLayer { sender }, EngineLogReceiver { receiver })
}

/// `tracing` has no notice level, so every level moves one step up the runlevel
/// scale and `INFO` lands on `NOTICE`.
fn runlevel_for(level: &Level) -> Runlevel {
    match *level {
        Level::TRACE => Runlevel::Debug,
        Level::DEBUG => Runlevel::Info,
        Level::INFO => Runlevel::Notice,
        Level::WARN => Runlevel::Warn,
        Level::ERROR => Runlevel::Err,
    }
}

impl<S> Layer<S> for EngineLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let runlevel = runlevel_for(event.metadata().level());
        let entry = LogEntry::new(
            now_timestamp(),
            runlevel.engine_category(),
            visitor.finish(),
            runlevel.color(),
        );

        // the receiver is gone once the engine has shut down
        let _ = self.sender.send(entry);
    }
}

impl EngineLogReceiver {
    /// Registers received entries with `router` until it is dropped.
    pub fn forward_to(self, router: &Arc<EventRouter>) -> io::Result<JoinHandle<()>> {
        let router: Weak<EventRouter> = Arc::downgrade(router);

        thread::Builder::new()
            .name("engine-log-forwarder".to_string())
            .spawn(move || {
                for entry in self.receiver {
                    let Some(router) = router.upgrade() else {
                        break;
                    };
                    router.register(entry);
                }
            })
    }

    /// Entries received so far, without blocking.
    pub fn drain(&self) -> Vec<LogEntry> {
        self.receiver.try_iter().collect()
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}
