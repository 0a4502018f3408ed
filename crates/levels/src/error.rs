//! Error types for the levels crate

use keepmap_core::KeepError;

/// Level-specific error types
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// File I/O error
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    /// Invalid map file format
    #[error("Invalid map format: {0}")]
    InvalidFormat(String),

    /// Parse error
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Tile data error
    #[error("Tile error: {0}")]
    TileError(String),

    /// Level not found
    #[error("Level not found: {0}")]
    NotFound(String),
}

impl From<LevelError> for KeepError {
    fn from(err: LevelError) -> Self {
        match err {
            LevelError::FileError(e) => KeepError::Io(e),
            LevelError::NotFound(name) => KeepError::NotFound(name),
            other => KeepError::InvalidData(other.to_string()),
        }
    }
}

/// Result type for level operations
pub type Result<T> = std::result::Result<T, LevelError>;
