use crate::harness::{FakeSource, RecordingRenderer};
use relaywatch_core::LogEngine;
use relaywatch_core::conf::LogConfig;
use std::sync::Arc;

/// Defaults with a fast refresh rate and no dividers, so frames are easy to compare.
pub fn test_config() -> LogConfig {
    LogConfig {
        show_date_dividers: false,
        max_refresh_rate_ms: 10,
        ..LogConfig::default()
    }
}

pub fn start_engine(
    config: &LogConfig,
    source: FakeSource,
) -> (LogEngine, Arc<FakeSource>, Arc<RecordingRenderer>) {
    start_engine_with(config, source, RecordingRenderer::default())
}

pub fn start_engine_with(
    config: &LogConfig,
    source: FakeSource,
    renderer: RecordingRenderer,
) -> (LogEngine, Arc<FakeSource>, Arc<RecordingRenderer>) {
    let source = Arc::new(source);
    let renderer = Arc::new(renderer);
    let engine = LogEngine::start(config, source.clone(), renderer.clone())
        .expect("failed to start engine");
    (engine, source, renderer)
}
