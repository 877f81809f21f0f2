//! Error types for rust-yangdemo

use thiserror::Error;

/// Main error type for data tree operations
#[derive(Debug, Error)]
pub enum YangError {
    /// A list entry with the same key already exists
    #[error("Duplicate key '{key}' in list {list}")]
    DuplicateKey { list: String, key: String },

    /// A list entry was supplied without its key leaf
    #[error("Missing list key: {0}")]
    MissingKey(String),

    /// One or more schema constraints are violated
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Well-formed JSON that does not fit the schema tree
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (file operations, demo output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid schema description
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Schema path does not name a node
    #[error("Schema node not found: {0}")]
    NodeNotFound(String),

    /// Rejected encoding options
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Decoded tree differs from the one that was encoded
    #[error("Round-trip mismatch: {0}")]
    RoundTrip(String),
}

impl YangError {
    /// True for errors raised while reading textual input
    pub fn is_parse_error(&self) -> bool {
        matches!(self, YangError::Json(_) | YangError::Parse(_))
    }

    /// Violations carried by a validation error
    pub fn violations(&self) -> &[String] {
        match self {
            YangError::Validation(v) => v,
            _ => &[],
        }
    }
}

/// Result type alias for data tree operations
pub type Result<T> = std::result::Result<T, YangError>;
