//! Error types for the Crucible harness
//!
//! A `Verdict::Fail` is deliberately *not* represented here: a failing
//! fixture is recorded data, not a harness fault. Everything in this module
//! aborts the session.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Crucible
#[derive(Error, Debug)]
pub enum Error {
    /// The fixtures root does not exist or cannot be read
    #[error("DiscoveryError: {}: {}", .path.display(), .message)]
    Discovery { path: PathBuf, message: String },

    /// A fixture's expectation marker is absent or cannot be parsed
    #[error("MalformedExpectationError: {}: {}", .path.display(), .message)]
    MalformedExpectation { path: PathBuf, message: String },

    /// The binary under test could not be spawned at all
    #[error("ExecutionError: failed to spawn {}: {}", .binary.display(), .source)]
    Execution {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external build step failed before any fixture ran
    #[error("BuildError: {0}")]
    Build(String),

    /// IO error (sidecar writes, stream output)
    #[error("IOError: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a discovery error for the given root path
    pub fn discovery(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Discovery {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a malformed-expectation error for the given fixture
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::MalformedExpectation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an execution error for a binary that could not be spawned
    pub fn execution(binary: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Execution {
            binary: binary.into(),
            source,
        }
    }

    /// Create a build error
    pub fn build(message: impl Into<String>) -> Self {
        Error::Build(message.into())
    }
}

/// Result type alias for Crucible
pub type Result<T> = std::result::Result<T, Error>;
