use std::path::PathBuf;

/// Hard failures of the import pipeline.
///
/// Malformed markdown never produces one of these; it degrades to warnings.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
}
