use crate::entry::Runlevel;
use std::path::{Path, PathBuf};

/// Inclusive span of runlevels a log file records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunlevelRange {
    pub low: Runlevel,
    pub high: Runlevel,
}

impl RunlevelRange {
    /// `notice` means notice and everything above it, `info-warn` is an explicit span.
    pub fn parse(text: &str) -> Option<Self> {
        match text.split_once('-') {
            Some((low, high)) => {
                let low = Runlevel::from_name(low)?;
                let high = Runlevel::from_name(high)?;
                (low <= high).then_some(Self { low, high })
            }
            None => Runlevel::from_name(text).map(|low| Self {
                low,
                high: Runlevel::Err,
            }),
        }
    }

    pub fn contains(&self, runlevel: Runlevel) -> bool {
        self.low <= runlevel && runlevel <= self.high
    }

    pub fn iter(&self) -> impl Iterator<Item = Runlevel> + '_ {
        Runlevel::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

/// The daemon's log-file destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSinkConfig {
    pub path: PathBuf,
    /// `None` when the daemon's runlevel declaration could not be understood.
    pub range: Option<RunlevelRange>,
}

impl LogSinkConfig {
    /// Reads the first file destination out of the daemon's `Log` option values,
    /// which look like `notice file /var/log/relay/notices.log`. `path_prefix` is
    /// prepended to the path, for daemons running in a chroot.
    pub fn from_log_options<'a>(
        options: impl IntoIterator<Item = &'a str>,
        path_prefix: Option<&Path>,
    ) -> Option<Self> {
        options.into_iter().find_map(|option| {
            let mut parts = option.split_whitespace();
            let levels = parts.next()?;
            if parts.next()? != "file" {
                return None;
            }
            let path = parts.next()?;

            let path = match path_prefix {
                Some(prefix) => prefix.join(path.trim_start_matches('/')),
                None => PathBuf::from(path),
            };

            Some(Self {
                path,
                range: RunlevelRange::parse(levels),
            })
        })
    }
}
