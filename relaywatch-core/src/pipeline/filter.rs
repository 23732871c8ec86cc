use crate::entry::LogEntry;
use crate::pipeline::FilterError;
use regex::Regex;

/// Most patterns remembered at once.
pub const MAX_REGEX_FILTERS: usize = 5;

/// The active regex filter plus a short most-recently-used list of patterns.
///
/// Every remembered pattern compiled when it was added. A pattern that fails to
/// compile leaves the engine untouched.
#[derive(Debug, Default)]
pub struct FilterEngine {
    active: Option<Regex>,
    remembered: Vec<String>,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers the given patterns in order of preference, skipping ones that don't
    /// compile.
    pub fn with_patterns<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Self {
        let mut engine = Self::new();

        let patterns: Vec<&str> = patterns.into_iter().collect();
        for pattern in patterns.into_iter().rev() {
            if let Err(err) = engine.remember(pattern) {
                tracing::info!(error = %err, "ignoring configured filter");
            }
        }

        engine
    }

    pub fn apply(&self, entry: &LogEntry) -> bool {
        match &self.active {
            Some(regex) => regex.is_match(entry.display_message()),
            None => true,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_ref().map(Regex::as_str)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Remembered patterns, most recently used first.
    pub fn options(&self) -> &[String] {
        &self.remembered
    }

    pub fn set_active(&mut self, pattern: Option<&str>) -> Result<(), FilterError> {
        let Some(pattern) = pattern else {
            self.active = None;
            return Ok(());
        };

        let regex = compile(pattern)?;
        self.promote(pattern);
        self.active = Some(regex);
        Ok(())
    }

    pub fn remember(&mut self, pattern: &str) -> Result<(), FilterError> {
        compile(pattern)?;
        self.promote(pattern);
        Ok(())
    }

    pub fn forget(&mut self, pattern: &str) {
        self.remembered.retain(|p| p != pattern);

        if self.active() == Some(pattern) {
            self.active = None;
        }
    }

    fn promote(&mut self, pattern: &str) {
        self.remembered.retain(|p| p != pattern);
        self.remembered.insert(0, pattern.to_string());
        self.remembered.truncate(MAX_REGEX_FILTERS);
    }
}

fn compile(pattern: &str) -> Result<Regex, FilterError> {
    Regex::new(pattern).map_err(|err| FilterError::invalid_pattern(pattern, err))
}
