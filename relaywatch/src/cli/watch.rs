use crate::source::{Input, PipedSource, parse_input};
use crate::terminal::TerminalRenderer;
use anyhow::Context;
use clap::Args;
use relaywatch_core::LogEngine;
use relaywatch_core::conf::{LogConfig, load_config};
use relaywatch_core::entry::now_timestamp;
use relaywatch_core::logging::{LogMode, init_logging};
use relaywatch_core::router::engine_log_channel;
use relaywatch_core::source::{LogSinkConfig, RunlevelRange, SourceState};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::thread;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Event flags, overriding the config file
    #[arg(long)]
    events: Option<String>,

    /// Initial filter pattern
    #[arg(long)]
    filter: Option<String>,

    /// The daemon's log file, used for backfill
    #[arg(long)]
    daemon_log: Option<PathBuf>,

    /// Runlevels the daemon's log file records, e.g. `notice` or `info-err`
    #[arg(long, default_value = "notice")]
    daemon_log_level: String,

    /// Where relaywatch writes its own diagnostics
    #[arg(long, default_value = "relaywatch.log")]
    diagnostics: PathBuf,

    /// Write diagnostics as JSON
    #[arg(long)]
    json: bool,

    /// Save the entries on screen here when exiting
    #[arg(long)]
    save_on_exit: Option<PathBuf>,
}

impl Default for WatchArgs {
    fn default() -> Self {
        Self {
            config: None,
            events: None,
            filter: None,
            daemon_log: None,
            daemon_log_level: "notice".to_string(),
            diagnostics: PathBuf::from("relaywatch.log"),
            json: false,
            save_on_exit: None,
        }
    }
}

pub fn run_watch(args: WatchArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => LogConfig::default(),
    };
    if let Some(events) = &args.events {
        config.events = events.clone();
    }

    let mode = if args.json { LogMode::Json } else { LogMode::Pretty };
    let (layer, receiver) = engine_log_channel();
    let _guard = init_logging(mode, Some(args.diagnostics.as_path()), Some(layer))
        .context("failed to set up diagnostics")?;

    let log_sink = args.daemon_log.map(|path| LogSinkConfig {
        path,
        range: RunlevelRange::parse(&args.daemon_log_level),
    });
    let source = Arc::new(PipedSource::new(log_sink));
    let renderer = Arc::new(TerminalRenderer::from_env());

    let engine = Arc::new(LogEngine::start(&config, source, renderer.clone())?);
    engine
        .forward_engine_logs(receiver)
        .context("failed to start the diagnostics forwarder")?;

    if let Some(filter) = &args.filter {
        engine.set_filter(Some(filter.as_str()))?;
    }

    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(());
    })?;

    renderer.hide_cursor();

    // stdin reader: the process exits without joining it
    let reader_engine = Arc::clone(&engine);
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || read_events(&reader_engine))?;

    let _ = shutdown_rx.recv();
    tracing::info!("shutdown requested");

    if let Some(path) = &args.save_on_exit {
        match engine.save_snapshot(path) {
            Ok(written) => tracing::info!(entries = written, "saved snapshot on exit"),
            Err(e) => tracing::error!(error = %e, "failed to save snapshot on exit"),
        }
    }

    engine.halt();
    renderer.restore_cursor();
    Ok(())
}

fn read_events(engine: &LogEngine) {
    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "failed to read from stdin");
                break;
            }
        };

        match parse_input(&line, now_timestamp()) {
            Some(Input::Event(raw)) => {
                engine.accept(raw);
            }
            Some(Input::State(state)) => engine.source_state_changed(state),
            None => {}
        }
    }

    engine.source_state_changed(SourceState::Closed);
}
