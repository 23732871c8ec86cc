mod backfill;
pub mod conf;
mod events;
mod watch;

pub use backfill::{BackfillArgs, run_backfill};
pub use events::run_events;
pub use watch::{WatchArgs, run_watch};
