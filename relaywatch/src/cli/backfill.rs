use crate::source::PipedSource;
use clap::Args;
use relaywatch_core::entry::{Color, LogEntry};
use relaywatch_core::events::expand_events;
use relaywatch_core::ingest::{BackfillRequest, read_log_file_entries};
use relaywatch_core::source::{LogSinkConfig, RunlevelRange};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BackfillArgs {
    /// The daemon's log file
    path: PathBuf,

    /// Runlevels the log file records, e.g. `notice` or `info-err`
    #[arg(long, default_value = "notice")]
    level: String,

    /// Event flags selecting the runlevels to keep
    #[arg(long, default_value = "N3")]
    events: String,

    /// Lines read from the end of the file, 0 for all of them
    #[arg(long, default_value_t = 5000)]
    read_limit: usize,

    /// Most entries returned
    #[arg(long, default_value_t = 1000)]
    limit: usize,

    /// One JSON object per entry
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct EntryRecord<'a> {
    timestamp: i64,
    category: &'a str,
    message: &'a str,
    color: Color,
}

impl<'a> From<&'a LogEntry> for EntryRecord<'a> {
    fn from(entry: &'a LogEntry) -> Self {
        Self {
            timestamp: entry.timestamp(),
            category: entry.category(),
            message: entry.message(),
            color: entry.color(),
        }
    }
}

pub fn run_backfill(args: BackfillArgs) -> anyhow::Result<()> {
    let categories = expand_events(&args.events)?;
    let source = PipedSource::new(Some(LogSinkConfig {
        path: args.path,
        range: RunlevelRange::parse(&args.level),
    }));

    let entries = read_log_file_entries(
        &source,
        BackfillRequest {
            categories: &categories,
            read_limit: (args.read_limit > 0).then_some(args.read_limit),
            add_limit: Some(args.limit),
        },
    );

    // oldest first, like the file itself
    for entry in entries.iter().rev() {
        if args.json {
            println!("{}", serde_json::to_string(&EntryRecord::from(entry))?);
        } else {
            println!("{}", entry.dated_display_message());
        }
    }

    Ok(())
}
