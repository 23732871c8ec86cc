mod error;
mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use error::{ConfigError, ConfigWarning};
pub use loader::{load_config, parse_config};
pub use types::{
    LogConfig, MAX_LINES_PER_ENTRY_MIN, MAX_REFRESH_RATE_MIN_MS, MIN_CACHE_SIZE,
};
