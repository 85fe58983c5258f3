use std::fs;
use std::path::Path;

use mdview_engine::{deterministic_filename, ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("pages").join("nested");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn rewriting_a_page_replaces_it() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    let name = deterministic_filename(Some("Hello"), "base64:SGVsbG8=", "html");

    let first = writer.write(&name, "<p>one</p>").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "<p>one</p>");

    let second = writer.write(&name, "<p>two</p>").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "<p>two</p>");
}

#[test]
fn writer_for_target_splits_directory_and_name() {
    let (writer, name) = AtomicFileWriter::for_target(Path::new("out/page.html"));
    assert_eq!(writer.dir(), Path::new("out"));
    assert_eq!(name, "page.html");

    let (writer, name) = AtomicFileWriter::for_target(Path::new("page.html"));
    assert_eq!(writer.dir(), Path::new("."));
    assert_eq!(name, "page.html");
}

#[test]
fn file_in_place_of_directory_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("page.html", "data").is_err());
    assert!(!file_path.with_file_name("page.html").exists());
}
