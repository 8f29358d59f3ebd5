//! Error types for the gaze classification system.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    /// Log payload for an unparseable table cell. Loading never returns it;
    /// the cell is treated as missing and this value is only formatted
    /// into the warning.
    #[error("Malformed value in row {row}, column {column}: {value:?}")]
    MalformedCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Recording length mismatch: expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e.to_string())
    }
}
