//! Shared helpers for the crate's test modules.

use std::path::PathBuf;
use tempfile::TempDir;

pub fn create_test_mockups_dir() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent dirs");
    }
    std::fs::write(&path, content).expect("failed to write test file");
    path
}
