use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Every failure a network operation can report.
///
/// Parsing and validation either succeed completely or return one of these
/// without touching the network's weights.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// A referenced file does not exist.
    #[error("{what} file not found: {}", path.display())]
    NotFound { what: String, path: PathBuf },

    /// Wrong token type or premature end of data while parsing a text format.
    #[error("invalid {source_name}: {reason}")]
    Malformed { source_name: String, reason: String },

    /// Parsed values are structurally inconsistent with the network.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Reading or writing a file failed for a reason other than it being absent.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Construction parameters are unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl NetworkError {
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        NetworkError::Malformed {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Maps an I/O error on `path`, turning `NotFound` into the dedicated variant.
    pub fn from_io(what: &str, path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            NetworkError::NotFound {
                what: what.to_string(),
                path: path.to_path_buf(),
            }
        } else {
            NetworkError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Reads a whole text file, classifying failures.
pub(crate) fn read_text(what: &str, path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| NetworkError::from_io(what, path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = read_text("Weights input", &path).unwrap_err();
        assert!(matches!(err, NetworkError::NotFound { .. }));
        assert!(err.to_string().starts_with("Weights input file not found"));
    }

    #[test]
    fn other_io_errors_keep_their_source() {
        let err = NetworkError::from_io(
            "Weights output",
            Path::new("/x"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, NetworkError::Io { .. }));
        assert!(err.to_string().contains("denied"));
    }
}
