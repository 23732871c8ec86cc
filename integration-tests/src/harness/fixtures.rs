use relaywatch_core::entry::local_datetime;
use std::fs;
use std::path::{Path, PathBuf};

/// A daemon log line stamped with local time `timestamp`.
pub fn daemon_line(timestamp: i64, level: &str, message: &str) -> String {
    format!(
        "{} [{}] {}",
        local_datetime(timestamp).format("%b %d %H:%M:%S%.3f"),
        level,
        message
    )
}

/// Writes `lines` as `dir/notices.log` and returns its path.
pub fn write_daemon_log(dir: &Path, lines: &[String]) -> PathBuf {
    let path = dir.join("notices.log");
    let mut contents = lines.join("\n");
    contents.push('\n');
    fs::write(&path, contents).expect("failed to write daemon log fixture");
    path
}

/// Path of a file under `fixtures/`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}
