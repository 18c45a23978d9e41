use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the analysis engine.
///
/// Load errors are fatal for the run: no partial dataset or partial report
/// is ever returned. Empty activity tables are not errors and never appear
/// here.
#[derive(Error, Debug)]
pub enum InsightError {
    /// A dataset file could not be opened or read from disk.
    #[error("Failed to read dataset {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be parsed as JSON, or parsed but does not
    /// deserialize into the expected dataset shape.
    #[error("Failed to parse dataset: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// No dataset file was found at or under the given path.
    #[error("No dataset file found at {0}")]
    DatasetNotFound(PathBuf),

    /// Pass-through for raw I/O errors that do not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the insight crates.
pub type Result<T> = std::result::Result<T, InsightError>;
