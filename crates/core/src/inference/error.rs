//! Error types for schema inference

use thiserror::Error;

/// Errors that can occur while reading a sample or inferring a struct from it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// The header row has no columns
    #[error("Empty header: at least one column is required")]
    EmptyHeader,

    /// A sample record has more values than the header has columns
    #[error("Invalid record length: {record} values for {header} header columns")]
    InvalidRecordLength { header: usize, record: usize },

    /// No parser is registered under the requested format name
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// The sample holds a header but no data record
    #[error("Sample has no data record after the header")]
    MissingRecord,

    /// Malformed delimited input
    #[error("Parse error on line {line}: {message}")]
    Csv { line: usize, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for InferenceError {
    fn from(e: std::io::Error) -> Self {
        InferenceError::Io(e.to_string())
    }
}

/// Result type for inference operations
pub type InferenceResult<T> = Result<T, InferenceError>;
