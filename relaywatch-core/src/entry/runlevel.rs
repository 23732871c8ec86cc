use crate::entry::Color;
use std::fmt;

/// Prefix distinguishing the engine's own runlevels from the daemon's.
pub const ENGINE_PREFIX: &str = "WATCH_";

/// Ordered severity scale shared by the daemon and the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Runlevel {
    Debug,
    Info,
    Notice,
    Warn,
    Err,
}

impl Runlevel {
    pub const ALL: [Runlevel; 5] = [
        Runlevel::Debug,
        Runlevel::Info,
        Runlevel::Notice,
        Runlevel::Warn,
        Runlevel::Err,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Runlevel::Debug => "DEBUG",
            Runlevel::Info => "INFO",
            Runlevel::Notice => "NOTICE",
            Runlevel::Warn => "WARN",
            Runlevel::Err => "ERR",
        }
    }

    /// Case-insensitive lookup. Accepts the `ERROR` and `WARNING` spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "DEBUG" => Some(Runlevel::Debug),
            "INFO" => Some(Runlevel::Info),
            "NOTICE" => Some(Runlevel::Notice),
            "WARN" | "WARNING" => Some(Runlevel::Warn),
            "ERR" | "ERROR" => Some(Runlevel::Err),
            _ => None,
        }
    }

    /// This runlevel and every more severe one.
    pub fn and_above(self) -> impl Iterator<Item = Runlevel> {
        Self::ALL.into_iter().filter(move |r| *r >= self)
    }

    /// Category used for entries the engine logs about itself.
    pub fn engine_category(self) -> String {
        format!("{ENGINE_PREFIX}{}", self.as_str())
    }

    pub fn color(self) -> Color {
        match self {
            Runlevel::Debug => Color::Magenta,
            Runlevel::Info => Color::Blue,
            Runlevel::Notice => Color::Green,
            Runlevel::Warn => Color::Yellow,
            Runlevel::Err => Color::Red,
        }
    }
}

impl fmt::Display for Runlevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
