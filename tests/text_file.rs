use std::io::Write;
use std::path::PathBuf;

use customer_db::{Error, TextFile};
use tempfile::NamedTempFile;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(customer_db::text_file::DEFAULT_PATH)
}

// Setup opens the file; teardown is the caller's close() or the Drop.
fn fixture_open_close() -> TextFile {
    TextFile::open(fixture_path()).unwrap()
}

fn content(file: &mut TextFile) -> String {
    file.read_contents().unwrap()
}

#[test]
fn test_content() {
    let mut file = fixture_open_close();
    assert_eq!(content(&mut file), "Hello world");
}

#[test]
fn test_file_is_opened() {
    let file = fixture_open_close();
    assert!(!file.is_closed());
}

#[test]
fn test_file_is_closed_after_teardown() {
    let mut file = fixture_open_close();
    file.close();
    assert!(file.is_closed());
    file.close();
    assert!(file.is_closed());
}

#[test]
fn test_read_after_close_fails() {
    let mut file = fixture_open_close();
    file.close();
    let err = file.read_contents().unwrap_err();
    assert!(matches!(err, Error::Closed(ref path) if path == &fixture_path()));
}

#[test]
fn test_second_read_is_empty() {
    let mut file = fixture_open_close();
    assert_eq!(content(&mut file), "Hello world");
    assert_eq!(content(&mut file), "");
}

#[test]
fn test_open_default_uses_working_directory() {
    // Integration tests run from the package root, where file.txt lives.
    let mut file = TextFile::open_default().unwrap();
    assert_eq!(file.path(), std::path::Path::new("file.txt"));
    assert_eq!(content(&mut file), "Hello world");
}

#[test]
fn test_open_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let err = TextFile::open(&missing).unwrap_err();
    match err {
        Error::Io { path, source } => {
            assert_eq!(path, missing);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_reads_arbitrary_file() {
    let mut temp = NamedTempFile::new().unwrap();
    write!(temp, "line one\nline two").unwrap();
    let mut file = TextFile::open(temp.path()).unwrap();
    assert_eq!(content(&mut file), "line one\nline two");
}
