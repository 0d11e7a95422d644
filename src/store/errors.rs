//! # Store Errors
//!
//! A missing catalog file is not an error (the collection is simply empty).
//! Corruption gets its own variant so callers can tell "the file does not
//! exist yet" apart from "the file exists but cannot be parsed".

use std::io;
use std::path::Path;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("catalog file {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write catalog file {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Create a read I/O error
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create a corruption error
    pub fn corrupt(path: &Path, source: serde_json::Error) -> Self {
        Self::Corrupt {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create a write error
    pub fn write_failed(path: &Path, source: io::Error) -> Self {
        Self::WriteFailed {
            path: path.display().to_string(),
            source,
        }
    }

    /// Returns whether this error reports an unparsable catalog file
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }

    /// Stable code for log output
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "STORE_IO_ERROR",
            Self::Corrupt { .. } => "STORE_CORRUPT",
            Self::WriteFailed { .. } => "STORE_WRITE_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_display_names_the_file() {
        let path = PathBuf::from("/tmp/books.json");
        let err = StoreError::io(
            &path,
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let display = format!("{}", err);
        assert!(display.contains("/tmp/books.json"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn test_corrupt_is_distinguishable() {
        let path = PathBuf::from("/tmp/books.json");
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = StoreError::corrupt(&path, parse_err);
        assert!(err.is_corrupt());
        assert_eq!(err.code(), "STORE_CORRUPT");

        let io_err = StoreError::io(&path, io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(!io_err.is_corrupt());
    }
}
