//! Shared test helpers for harness integration tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Create a temporary corpus directory.
pub fn corpus_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Write a fixture file (extension `.t`) plus an optional sidecar marker,
/// returning the fixture path.
pub fn write_fixture(dir: &Path, name: &str, source: &str, marker: Option<&str>) -> PathBuf {
    let path = dir.join(format!("{name}.t"));
    fs::write(&path, source).expect("failed to write fixture");
    if let Some(marker) = marker {
        fs::write(path.with_extension("expected"), marker).expect("failed to write sidecar");
    }
    path
}

/// Read a fixture's sidecar expectation file.
#[allow(dead_code)]
pub fn read_sidecar(fixture: &Path) -> String {
    fs::read_to_string(fixture.with_extension("expected")).expect("failed to read sidecar")
}
