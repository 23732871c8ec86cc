use crate::view::ExportError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Replaces a leading `~` with the home directory, when there is one.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

/// Overwrites `path` with one line per entry, creating missing parent directories.
pub fn write_snapshot<I, S>(path: &Path, lines: I) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = expand_home(path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| ExportError::create_dir(parent, err))?;
    }

    let file = File::create(&path).map_err(|err| ExportError::write(&path, err))?;
    let mut out = BufWriter::new(file);
    let mut written = 0;

    for line in lines {
        writeln!(out, "{}", line.as_ref()).map_err(|err| ExportError::write(&path, err))?;
        written += 1;
    }

    out.flush().map_err(|err| ExportError::write(&path, err))?;
    Ok(written)
}
