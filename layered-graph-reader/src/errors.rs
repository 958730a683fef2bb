//! Error types for annotation readers.

use thiserror::Error;

/// Errors that can occur while selecting a dialect or loading records.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The dialect name is neither KAF nor NAF.
    #[error("unknown annotation dialect: {name}")]
    UnknownDialect { name: String },

    /// A record file could not be read.
    #[error("failed to load records: {path}: {message}")]
    Load { path: String, message: String },

    /// A record document could not be deserialized.
    #[error("failed to parse records: {message}")]
    Parse { message: String },
}

/// Result type for reader operations.
pub type ReaderResult<T> = Result<T, ReaderError>;
