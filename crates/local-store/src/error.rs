//! Error types for the local-store crate.
//!
//! Errors carry the slot key or file path involved so callers can report
//! which slot failed without inspecting I/O details.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while opening the store or reading and writing slots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The data directory could not be created or opened.
    #[error("failed to open store directory at '{path}': {message}")]
    Open {
        /// Directory that could not be opened.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The slot key is empty or contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid slot key '{key}'")]
    InvalidKey {
        /// The rejected key.
        key: String,
    },

    /// A slot file exists but could not be read as UTF-8 text.
    #[error("failed to read slot '{key}': {message}")]
    Read {
        /// Slot key being read.
        key: String,
        /// Description of the I/O error.
        message: String,
    },

    /// A slot could not be written.
    #[error("failed to write slot file at '{path}': {message}")]
    Write {
        /// File path being written.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_error_formats_correctly() {
        let err = StoreError::Open {
            path: Utf8PathBuf::from("/tmp/dashboard"),
            message: "permission denied".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to open store directory at '/tmp/dashboard': permission denied"
        );
    }

    #[test]
    fn invalid_key_formats_correctly() {
        let err = StoreError::InvalidKey {
            key: "../etc".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid slot key '../etc'");
    }

    #[test]
    fn read_error_formats_correctly() {
        let err = StoreError::Read {
            key: "localPosts".to_owned(),
            message: "stream did not contain valid UTF-8".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to read slot 'localPosts': stream did not contain valid UTF-8"
        );
    }

    #[test]
    fn write_error_formats_correctly() {
        let err = StoreError::Write {
            path: Utf8PathBuf::from("favorites"),
            message: "disk full".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to write slot file at 'favorites': disk full"
        );
    }
}
