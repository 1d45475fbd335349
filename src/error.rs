//! Error types for bench-compare

use thiserror::Error;

/// Result type alias for bench-compare operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bench-compare
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported unit: {unit}")]
    UnsupportedUnit { unit: String },

    #[error("Missing benchmark: {name}")]
    MissingBenchmark { name: String },

    #[error("Malformed measurement on line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("Cannot compare against {name}: its best time is 0ns")]
    ZeroBaseline { name: String },

    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
