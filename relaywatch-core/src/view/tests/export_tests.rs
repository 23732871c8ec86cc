use crate::view::{ExportError, expand_home, write_snapshot};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn writes_lines_and_creates_directories() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/deeper/snapshot.txt");

    // Act
    let written = write_snapshot(&path, ["first", "second"]).unwrap();

    // Assert
    assert_eq!(written, 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
}

#[test]
fn overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.txt");
    fs::write(&path, "stale content\nmore\n").unwrap();

    write_snapshot(&path, ["fresh"]).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
}

#[test]
fn directory_in_the_way_is_a_create_dir_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let result = write_snapshot(&blocker.join("snapshot.txt"), ["x"]);

    assert!(matches!(result, Err(ExportError::CreateDir { .. })));
}

#[test]
fn home_expansion_only_touches_leading_tilde() {
    let plain = Path::new("/tmp/a~b");

    assert_eq!(expand_home(plain), plain.to_path_buf());
    if let Some(home) = std::env::var_os("HOME") {
        assert_eq!(
            expand_home(Path::new("~/snap.txt")),
            Path::new(&home).join("snap.txt")
        );
    }
}
