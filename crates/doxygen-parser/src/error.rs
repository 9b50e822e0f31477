use std::path::PathBuf;
use thiserror::Error;

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while reading a Doxygen XML document
#[derive(Error, Debug)]
pub enum ParseError {
    /// The XML file does not exist
    #[error("XML file not found: {0}")]
    NotFound(PathBuf),

    /// The file exists but could not be read
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML
    #[error("Malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),
}
