//! Fixture discovery
//!
//! A fixture is a source file for the toolchain under test plus a sidecar
//! file carrying its expectation marker. The store walks a directory tree,
//! collects every file with the fixture extension, and pairs each with the
//! first line of its `.expected` sidecar.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Sidecar extension carrying a fixture's expectation marker.
pub const EXPECTED_EXTENSION: &str = "expected";

/// A discovered fixture. Immutable for the duration of the run.
#[derive(Debug, Clone)]
pub struct Fixture {
    path: PathBuf,
    expected_path: PathBuf,
    source: String,
    marker: Option<String>,
}

impl Fixture {
    /// Load a fixture and its sidecar expectation data from disk.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let source = fs::read_to_string(&path)?;
        let expected_path = path.with_extension(EXPECTED_EXTENSION);
        let marker = match fs::read_to_string(&expected_path) {
            Ok(content) => content.lines().next().map(str::to_string),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            expected_path,
            source,
            marker,
        })
    }

    /// Path of the fixture source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the sidecar expectation file (which may not exist yet).
    pub fn expected_path(&self) -> &Path {
        &self.expected_path
    }

    /// Raw source text handed to the toolchain.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The raw marker line: first line of the sidecar, if one exists.
    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }
}

/// Locates fixture files on a filesystem subtree.
pub struct FixtureStore {
    root: PathBuf,
    extension: String,
}

impl FixtureStore {
    /// Create a store rooted at `root`, matching files with `extension`.
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Recursively enumerate fixtures in directory-traversal order.
    ///
    /// The order is not stable across filesystems and nothing downstream may
    /// rely on it. An empty tree yields an empty vector, not an error; a
    /// missing or unreadable root is a [`Error::Discovery`].
    pub fn discover(&self) -> Result<Vec<Fixture>> {
        if !self.root.is_dir() {
            return Err(Error::discovery(&self.root, "not a readable directory"));
        }
        let mut fixtures = Vec::new();
        self.walk(&self.root, &mut fixtures)?;
        debug!(
            root = %self.root.display(),
            count = fixtures.len(),
            "fixture discovery complete"
        );
        Ok(fixtures)
    }

    fn walk(&self, dir: &Path, fixtures: &mut Vec<Fixture>) -> Result<()> {
        let entries = fs::read_dir(dir).map_err(|e| Error::discovery(dir, e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::discovery(dir, e.to_string()))?;
            let path = entry.path();
            if path.is_dir() {
                self.walk(&path, fixtures)?;
            } else if path
                .extension()
                .map(|ext| ext == self.extension.as_str())
                .unwrap_or(false)
            {
                fixtures.push(Fixture::load(path)?);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn discovers_fixtures_recursively() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.t", "print 1");
        fs::create_dir(dir.path().join("nested")).unwrap();
        write(&dir.path().join("nested"), "b.t", "print 2");
        write(dir.path(), "notes.md", "not a fixture");

        let fixtures = FixtureStore::new(dir.path(), "t").discover().unwrap();
        assert_eq!(fixtures.len(), 2);
    }

    #[test]
    fn empty_directory_yields_no_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        let fixtures = FixtureStore::new(dir.path(), "t").discover().unwrap();
        assert!(fixtures.is_empty());
    }

    #[test]
    fn missing_root_is_a_discovery_error() {
        let err = FixtureStore::new("/no/such/root", "t").discover().unwrap_err();
        assert!(matches!(err, Error::Discovery { .. }));
    }

    #[test]
    fn pairs_fixture_with_sidecar_marker() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.t", "print 1");
        write(dir.path(), "a.expected", "e: '1'");

        let fixtures = FixtureStore::new(dir.path(), "t").discover().unwrap();
        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures[0].marker(), Some("e: '1'"));
        assert_eq!(fixtures[0].source(), "print 1");
    }

    #[test]
    fn marker_is_only_the_first_sidecar_line() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.t", "print 1");
        write(dir.path(), "a.expected", "e: '1'\nstray second line");

        let fixtures = FixtureStore::new(dir.path(), "t").discover().unwrap();
        assert_eq!(fixtures[0].marker(), Some("e: '1'"));
    }

    #[test]
    fn missing_sidecar_leaves_marker_absent() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.t", "print 1");

        let fixtures = FixtureStore::new(dir.path(), "t").discover().unwrap();
        assert_eq!(fixtures[0].marker(), None);
        assert!(fixtures[0].expected_path().ends_with("a.expected"));
    }

    #[test]
    fn empty_sidecar_counts_as_absent_marker() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.t", "print 1");
        write(dir.path(), "a.expected", "");

        let fixtures = FixtureStore::new(dir.path(), "t").discover().unwrap();
        assert_eq!(fixtures[0].marker(), None);
    }
}
