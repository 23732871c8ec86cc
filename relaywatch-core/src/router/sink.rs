use crate::entry::LogEntry;
use crate::router::SinkError;
use std::fs::{self, File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};

/// Append-only file receiving the dated display line of every accepted entry.
#[derive(Debug)]
pub struct EventSink {
    path: PathBuf,
    out: LineWriter<File>,
}

impl EventSink {
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SinkError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SinkError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            out: LineWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&mut self, entry: &LogEntry) -> io::Result<()> {
        writeln!(self.out, "{}", entry.dated_display_message())
    }
}
