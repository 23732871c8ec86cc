use crate::conf::{ConfigError, LogConfig};
use std::fs;
use std::path::Path;

/// Reads and parses `path`. Clamping is left to [`LogConfig::normalize`] so that
/// callers can report the warnings.
pub fn load_config(path: &Path) -> Result<LogConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_config(path, &text)
}

/// Parses YAML text. An empty document yields the defaults.
pub fn parse_config(path: &Path, text: &str) -> Result<LogConfig, ConfigError> {
    if text.trim().is_empty() {
        return Ok(LogConfig::default());
    }

    serde_yaml::from_str(text).map_err(|e| ConfigError::parse(path, e))
}
