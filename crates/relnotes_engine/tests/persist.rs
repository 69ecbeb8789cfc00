use std::fs;

use relnotes_core::WatermarkStore;
use relnotes_engine::{ensure_output_dir, AtomicFileWriter, FileWatermarkStore};
use tempfile::TempDir;

#[test]
fn creates_missing_state_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("state");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("state.ron", "hello").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write("state.ron", "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
}

#[test]
fn write_into_file_path_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("state.ron", "data").is_err());
    assert!(!file_path.with_file_name("state.ron").exists());
}

#[test]
fn missing_watermark_reads_as_never_updated() {
    let temp = TempDir::new().unwrap();
    let store = FileWatermarkStore::new(temp.path().join("state"));
    assert_eq!(store.get(), 0);
}

#[test]
fn watermark_survives_a_new_store_instance() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("state");

    let mut store = FileWatermarkStore::new(&dir);
    store.set(1_704_844_800_000).unwrap();
    assert_eq!(store.get(), 1_704_844_800_000);

    let reopened = FileWatermarkStore::new(&dir);
    assert_eq!(reopened.get(), 1_704_844_800_000);
}

#[test]
fn corrupt_watermark_reads_as_never_updated() {
    let temp = TempDir::new().unwrap();
    let store = FileWatermarkStore::new(temp.path());
    fs::write(store.path(), "this is not ron").unwrap();
    assert_eq!(store.get(), 0);
}

#[test]
fn unwritable_state_dir_reports_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("occupied");
    fs::write(&file_path, "x").unwrap();

    let mut store = FileWatermarkStore::new(&file_path);
    assert!(store.set(42).is_err());
    assert_eq!(store.get(), 0);
}
