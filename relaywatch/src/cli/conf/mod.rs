mod check;
mod dump;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to the config file
        #[arg(default_value = "relaywatch.yaml")]
        path: PathBuf,

        /// Plain output without colors
        #[arg(short, long, default_value = "false")]
        plain: bool,
    },

    /// Print resolved configuration
    Dump {
        #[arg(default_value = "relaywatch.yaml")]
        path: PathBuf,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },
}
