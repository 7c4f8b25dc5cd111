//! Error types for Bookstore
//!
//! All modules use `BookstoreResult<T>` as their return type.

use crate::model::ResultCode;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Bookstore operations
pub type BookstoreResult<T> = Result<T, BookstoreError>;

/// All errors that can occur in Bookstore
#[derive(Error, Debug)]
pub enum BookstoreError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Repository errors
    #[error("Invalid repository path '{path}': {reason}")]
    PathInvalid { path: String, reason: String },

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Node already exists: {0}")]
    NodeExists(String),

    #[error("Repository data file is corrupt: {path}: {reason}")]
    RepositoryCorrupt { path: PathBuf, reason: String },

    // Catalog errors
    #[error("{0}")]
    Validation(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("Malformed book node {path}: {reason}")]
    MalformedBook { path: String, reason: String },

    // Server errors
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookstoreError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a path error
    pub fn path_invalid(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PathInvalid {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Result code reported to REST clients for this error
    pub fn result_code(&self) -> ResultCode {
        match self {
            Self::Validation(_) | Self::PathInvalid { .. } => ResultCode::ValidationFailed,
            Self::BookNotFound(_) | Self::NodeNotFound(_) => ResultCode::NotFound,
            Self::AlreadyExists(_) | Self::NodeExists(_) => ResultCode::AlreadyExist,
            _ => ResultCode::Failed,
        }
    }

    /// Whether the message is safe to echo back to a client verbatim
    pub fn is_client_facing(&self) -> bool {
        self.result_code() != ResultCode::Failed
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigNotFound(_) => Some("Run: bookstore config init"),
            Self::ConfigInvalid { .. } => Some("Fix the file or reset it with: bookstore config init --force"),
            Self::Bind { .. } => Some("Pick another address with: bookstore serve --bind <addr>"),
            Self::RepositoryCorrupt { .. } => {
                Some("Move the data file aside; the repository starts empty without it")
            }
            _ => None,
        }
    }
}
