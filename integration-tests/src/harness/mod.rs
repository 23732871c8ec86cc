pub mod engine;
pub mod fixtures;
pub mod renderer;
pub mod source;
pub mod tracing;

pub use engine::{start_engine, start_engine_with, test_config};
pub use fixtures::{daemon_line, fixture, write_daemon_log};
pub use renderer::{RecordedFrame, RecordingRenderer};
pub use source::FakeSource;
pub use tracing::{CapturedEvent, captured_events, init_test_tracing};
