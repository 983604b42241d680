//! Domain error types
//!
//! Defines the error taxonomy for scour. All errors are domain-specific and
//! don't expose third-party parser or codec types.

use std::path::PathBuf;
use thiserror::Error;

/// Main scour error type
///
/// This is the primary error type used throughout the application.
/// Load and save failures are fatal for the file they occurred on; no partial
/// output is retained for that file.
#[derive(Debug, Error)]
pub enum ScourError {
    /// The medium could not be opened or parsed
    #[error("Failed to load {path}: {reason}")]
    LoadFailure { path: PathBuf, reason: String },

    /// The commit step failed; in-memory redactions for the file are discarded
    #[error("Failed to save {path}: {reason}")]
    SaveFailure { path: PathBuf, reason: String },

    /// File type not covered by any adapter
    #[error("Unsupported medium: {0}")]
    UnsupportedMedium(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Pattern library errors (invalid TOML, invalid regex, unknown category)
    #[error("Pattern library error: {0}")]
    PatternLibrary(String),

    /// OCR capability errors (missing binary, unparseable output)
    #[error("OCR error: {0}")]
    Ocr(String),

    /// Audit trail persistence errors
    #[error("Audit error: {0}")]
    Audit(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl ScourError {
    /// Build a load failure for `path`
    pub fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::LoadFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a save failure for `path`
    pub fn save(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SaveFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_display() {
        let err = ScourError::load("/tmp/in.docx", "not a zip archive");
        assert!(err.to_string().contains("/tmp/in.docx"));
        assert!(err.to_string().contains("not a zip archive"));
    }

    #[test]
    fn test_unsupported_medium_display() {
        let err = ScourError::UnsupportedMedium("dwg".to_string());
        assert_eq!(err.to_string(), "Unsupported medium: dwg");
    }
}
