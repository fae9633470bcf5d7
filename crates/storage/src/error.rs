//! Storage error taxonomy.

use loadplan_core::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs or writing outputs.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The input file does not exist.
    #[error("file not found: {}", .path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The file extension does not map to a supported format.
    #[error("unsupported file extension for {}: expected {expected}", .path.display())]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
        /// Human-readable list of accepted extensions.
        expected: &'static str,
    },

    /// The file content is not valid YAML/JSON/CSV.
    #[error("failed to parse {}: {message}", .path.display())]
    Parse {
        /// Offending path.
        path: PathBuf,
        /// Underlying parser message.
        message: String,
    },

    /// A record could not be serialized for writing.
    #[error("failed to serialize record: {message}")]
    Serialize {
        /// Underlying serializer message.
        message: String,
    },

    /// An underlying filesystem operation failed.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The parsed profile violated schema or range rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StorageError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &std::path::Path, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}
