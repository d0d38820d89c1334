use std::path::PathBuf;
use thiserror::Error;

/// Errors from the file, configuration and CLI layer.
///
/// Extraction itself never fails: an unusable input simply produces an empty
/// record.
#[derive(Error, Debug)]
pub enum DatestampError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid option `{field}`: {reason}")]
    InvalidOptions { field: &'static str, reason: String },

    #[error("File not found: {}", path.display())]
    MissingInputFile { path: PathBuf },

    #[error("Text column `{name}` not found in header")]
    MissingTextColumn { name: String },

    #[error("CSV header has no columns")]
    EmptyHeader,
}

pub type Result<T> = std::result::Result<T, DatestampError>;
