use crate::entry::{Color, local_datetime, printable};
use once_cell::sync::OnceCell;
use std::borrow::Cow;
use std::fmt;

/// Category of the synthetic entries marking a change of local day.
pub const DAYBREAK: &str = "DAYBREAK";

/// A single event, either received live or recovered from the daemon's log file.
///
/// Entries are immutable. The one-line display string is built on first use and
/// cached; the dated variant is only needed for exports and is built each time.
#[derive(Clone)]
pub struct LogEntry {
    timestamp: i64,
    category: String,
    message: String,
    color: Color,
    display: OnceCell<String>,
}

impl LogEntry {
    pub fn new(
        timestamp: i64,
        category: impl Into<String>,
        message: impl Into<String>,
        color: Color,
    ) -> Self {
        Self {
            timestamp,
            category: category.into(),
            message: message.into(),
            color,
            display: OnceCell::new(),
        }
    }

    /// Marker for the start of the local day beginning at `timestamp`.
    pub fn daybreak(timestamp: i64) -> Self {
        Self::new(timestamp, DAYBREAK, "", Color::White)
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_daybreak(&self) -> bool {
        self.category == DAYBREAK
    }

    /// Copy of this entry with terminal control characters removed from the message.
    pub fn sanitized(self) -> Self {
        match printable(&self.message) {
            Cow::Borrowed(_) => self,
            Cow::Owned(cleaned) => Self::new(self.timestamp, self.category, cleaned, self.color),
        }
    }

    /// `HH:MM:SS [CATEGORY] message`
    pub fn display_message(&self) -> &str {
        self.display.get_or_init(|| {
            format!(
                "{} [{}] {}",
                local_datetime(self.timestamp).format("%H:%M:%S"),
                self.category,
                self.message
            )
        })
    }

    /// `MM/DD/YYYY HH:MM:SS [CATEGORY] message`
    pub fn dated_display_message(&self) -> String {
        format!(
            "{} [{}] {}",
            local_datetime(self.timestamp).format("%m/%d/%Y %H:%M:%S"),
            self.category,
            self.message
        )
    }

    /// Display string split into its lines, each trimmed.
    pub fn display_lines(&self) -> impl Iterator<Item = &str> {
        self.display_message().split('\n').map(str::trim)
    }
}

impl PartialEq for LogEntry {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
            && self.color == other.color
            && self.category == other.category
            && self.message == other.message
    }
}

impl Eq for LogEntry {}

impl fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEntry")
            .field("timestamp", &self.timestamp)
            .field("category", &self.category)
            .field("message", &self.message)
            .field("color", &self.color)
            .finish()
    }
}
