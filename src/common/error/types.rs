//! Unified error types for csf-yaml.
use thiserror::Error;

/// Main error type for csf-yaml operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// Package part not found
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// Invalid or unsupported workbook layout
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A label or reference cell does not fit its grammar
    #[error("Row {row}, column {column}: cannot parse {text:?}")]
    Grammar {
        row: u32,
        column: usize,
        text: String,
    },

    /// A reference cell names a standard outside the recognized set
    #[error("Row {row}: unrecognized standard in {text:?}")]
    UnknownStandard { row: u32, text: String },

    /// Levels appear out of order for the hierarchy
    #[error("Row {row}: {reason}")]
    Structure { row: u32, reason: String },

    /// Output serialization failed
    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Result type for csf-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;
