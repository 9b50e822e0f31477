use std::path::PathBuf;
use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur during snippet retrieval and chunk formatting
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// Requested line range violates the retriever preconditions
    #[error("Invalid line range: start={start}, end={end} (lines are 1-indexed, end >= start)")]
    InvalidRange { start: u32, end: u32 },

    /// Source file does not exist
    #[error("Source file not found: {0}")]
    NotFound(PathBuf),

    /// Requested lines lie beyond the end of the file
    #[error("Line range {start}-{end} out of range for {path} ({line_count} lines)")]
    OutOfRange {
        start: u32,
        end: u32,
        line_count: usize,
        path: PathBuf,
    },

    /// Element has no complete source location to format against
    #[error("Element '{0}' has no complete location")]
    MissingLocation(String),

    /// Other IO failure while reading a source file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
