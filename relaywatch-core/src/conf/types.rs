use crate::conf::{ConfigError, ConfigWarning};
use crate::events::expand_events;
use crate::ingest::BackfillSettings;
use crate::pipeline::{CommonMessages, MAX_REGEX_FILTERS};
use crate::view::ViewSettings;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::time::Duration;

pub const MAX_LINES_PER_ENTRY_MIN: usize = 1;
pub const MAX_REFRESH_RATE_MIN_MS: u64 = 10;
pub const MIN_CACHE_SIZE: usize = 1000;

/// Settings of the event panel. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Persistent sink receiving every accepted entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub show_date_dividers: bool,

    #[serde(default)]
    pub show_duplicate_entries: bool,

    /// Days an entry is kept. 0 keeps entries regardless of age.
    #[serde(default = "default_entry_duration_days")]
    pub entry_duration_days: u32,

    #[serde(default = "default_max_lines_per_entry")]
    pub max_lines_per_entry: usize,

    /// Backfill from the daemon's log file on (re)connect.
    #[serde(default = "default_true")]
    pub prepopulate: bool,

    /// Lines read from the end of the log file. 0 reads the whole file.
    #[serde(default = "default_prepopulate_read_limit")]
    pub prepopulate_read_limit: usize,

    #[serde(default = "default_max_refresh_rate_ms")]
    pub max_refresh_rate_ms: u64,

    /// Filter patterns offered for selection.
    #[serde(default)]
    pub regex: Vec<String>,

    /// Buffer capacity, also the cap on entries added by a backfill.
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,

    /// Event flags, see `events::EVENT_LISTING`.
    #[serde(default = "default_events")]
    pub events: String,

    /// Category to message prefixes treated as equal when deduplicating. A
    /// leading `*` matches anywhere in the message.
    #[serde(default)]
    pub common_messages: HashMap<String, Vec<String>>,
}

fn default_true() -> bool {
    true
}

fn default_entry_duration_days() -> u32 {
    7
}

fn default_max_lines_per_entry() -> usize {
    6
}

fn default_prepopulate_read_limit() -> usize {
    5000
}

fn default_max_refresh_rate_ms() -> u64 {
    300
}

fn default_cache_size() -> usize {
    1000
}

fn default_events() -> String {
    "N3".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            show_date_dividers: true,
            show_duplicate_entries: false,
            entry_duration_days: default_entry_duration_days(),
            max_lines_per_entry: default_max_lines_per_entry(),
            prepopulate: true,
            prepopulate_read_limit: default_prepopulate_read_limit(),
            max_refresh_rate_ms: default_max_refresh_rate_ms(),
            regex: Vec::new(),
            cache_size: default_cache_size(),
            events: default_events(),
            common_messages: HashMap::new(),
        }
    }
}

impl LogConfig {
    /// Raises or truncates out-of-range values, logging a warning for each.
    pub fn normalize(&mut self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.max_lines_per_entry < MAX_LINES_PER_ENTRY_MIN {
            warnings.push(ConfigWarning::new(
                "max_lines_per_entry",
                format!(
                    "{} is below the minimum, using {MAX_LINES_PER_ENTRY_MIN}",
                    self.max_lines_per_entry
                ),
            ));
            self.max_lines_per_entry = MAX_LINES_PER_ENTRY_MIN;
        }

        if self.max_refresh_rate_ms < MAX_REFRESH_RATE_MIN_MS {
            warnings.push(ConfigWarning::new(
                "max_refresh_rate_ms",
                format!(
                    "{} is below the minimum, using {MAX_REFRESH_RATE_MIN_MS}",
                    self.max_refresh_rate_ms
                ),
            ));
            self.max_refresh_rate_ms = MAX_REFRESH_RATE_MIN_MS;
        }

        if self.cache_size < MIN_CACHE_SIZE {
            warnings.push(ConfigWarning::new(
                "cache_size",
                format!("{} is below the minimum, using {MIN_CACHE_SIZE}", self.cache_size),
            ));
            self.cache_size = MIN_CACHE_SIZE;
        }

        if self.regex.len() > MAX_REGEX_FILTERS {
            warnings.push(ConfigWarning::new(
                "regex",
                format!(
                    "{} patterns given, keeping the first {MAX_REGEX_FILTERS}",
                    self.regex.len()
                ),
            ));
            self.regex.truncate(MAX_REGEX_FILTERS);
        }

        for warning in &warnings {
            tracing::warn!(key = warning.key, "{}", warning.message);
        }

        warnings
    }

    /// Categories selected by `events`.
    pub fn event_categories(&self) -> Result<BTreeSet<String>, ConfigError> {
        expand_events(&self.events).map_err(|source| ConfigError::InvalidEvents {
            events: self.events.clone(),
            source,
        })
    }

    pub fn backfill_settings(&self) -> BackfillSettings {
        BackfillSettings {
            enabled: self.prepopulate,
            read_limit: (self.prepopulate_read_limit > 0).then_some(self.prepopulate_read_limit),
            add_limit: Some(self.cache_size),
        }
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            show_date_dividers: self.show_date_dividers,
            max_lines_per_entry: self.max_lines_per_entry,
        }
    }

    /// Minimum time between two redraws.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.max_refresh_rate_ms)
    }

    pub fn common_messages(&self) -> CommonMessages {
        CommonMessages::new(self.common_messages.clone())
    }
}
