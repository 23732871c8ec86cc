mod cli;
mod source;
mod terminal;

use crate::cli::conf::{ConfigCmd, check, dump};
use crate::cli::{BackfillArgs, WatchArgs, run_backfill, run_events, run_watch};
use clap::{Parser, Subcommand};
use relaywatch_core::logging::{default_log_mode, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "relaywatch",
    version,
    about = "relaywatch: event panel for a relay daemon's control channel"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show live events read from stdin (default)
    Watch(WatchArgs),

    /// Print the entries a backfill would recover from a daemon log file
    Backfill(BackfillArgs),

    /// List event flags, or expand the given ones
    Events {
        /// Flags such as `N3` or `bcW`
        flags: Option<String>,
    },

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Watch(args)) => run_watch(args),
        None => run_watch(WatchArgs::default()),

        Some(Command::Backfill(args)) => {
            init_stderr_logging();
            run_backfill(args)
        }

        Some(Command::Events { flags }) => run_events(flags.as_deref()),

        Some(Command::Config { cmd }) => {
            init_stderr_logging();
            match cmd {
                ConfigCmd::Check { path, plain } => check(path, plain),
                ConfigCmd::Dump { path, json, yaml } => dump(path, json, yaml),
            }
        }
    };

    if let Err(e) = result {
        eprintln!("relaywatch: {e:#}");
        std::process::exit(1);
    }
}

fn init_stderr_logging() {
    if let Err(e) = init_logging(default_log_mode(), None, None) {
        eprintln!("relaywatch: {e}");
    }
}
