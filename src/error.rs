//! Error types for stability-diagram loading.

use thiserror::Error;

/// Result type alias for diagram loading operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading diagrams and their annotations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested archive subdirectory does not exist.
    ///
    /// This is fatal for the whole load: it usually means the pixel size or
    /// research group does not match the archive layout.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A compact grid table could not be parsed.
    ///
    /// This aborts only the affected diagram; the set loader skips it and
    /// keeps going.
    #[error("Grid parse error ({name}): {reason}")]
    Grid {
        /// Base name of the diagram whose table failed to parse.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// A label-index record could not be deserialized.
    #[error("Label index error at line {line}: {reason}")]
    LabelIndex {
        /// 1-based line number in the ndjson file.
        line: usize,
        /// Reason for the failure.
        reason: String,
    },

    /// Normalization statistics could not be loaded.
    #[error("Normalization statistics error: {0}")]
    Normalization(String),

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Zip archive error.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
