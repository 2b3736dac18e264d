//! Dataset error types.

use std::path::Path;
use thiserror::Error;

/// Fatal dataset failures.
///
/// Anything here aborts the current operation: the merge engine refuses to
/// work against a partially loaded dataset, so a single unreadable or
/// malformed file fails the whole load.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// File could not be read or written
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not valid JSON
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// In-memory records could not be serialized back to JSON
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DatasetError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Wrap a JSON parse error with the offending path
    pub fn parse(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Wrap a JSON serialization error with the destination path
    pub fn serialize(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Serialize {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
