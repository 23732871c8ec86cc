use crate::ingest::constants::TAIL_CHUNK_SIZE;
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Lines of a file, oldest first. With a limit only the last `limit` lines are
/// returned, read backwards from the end so huge logs are not loaded whole.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_lines(path: &Path, limit: Option<usize>) -> io::Result<Vec<String>> {
    match limit {
        Some(limit) => tail_lines(path, limit),
        None => {
            let bytes = fs::read(path)?;
            Ok(String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::to_string)
                .collect())
        }
    }
}

fn tail_lines(path: &Path, limit: usize) -> io::Result<Vec<String>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut file = File::open(path)?;
    let mut pos = file.metadata()?.len();
    let mut buf: Vec<u8> = Vec::new();
    let mut newlines = 0;

    // one newline more than the limit guarantees `limit` complete lines
    while pos > 0 && newlines <= limit {
        let step = TAIL_CHUNK_SIZE.min(pos);
        pos -= step;

        let mut chunk = vec![0; step as usize];
        file.seek(SeekFrom::Start(pos))?;
        file.read_exact(&mut chunk)?;

        newlines += chunk.iter().filter(|b| **b == b'\n').count();
        chunk.extend_from_slice(&buf);
        buf = chunk;
    }

    let text = String::from_utf8_lossy(&buf);
    let lines: Vec<&str> = text.lines().collect();
    let skip = lines.len().saturating_sub(limit);

    Ok(lines[skip..].iter().map(|line| line.to_string()).collect())
}
