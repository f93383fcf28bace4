//! Error types for grace-dizmo.
//!
//! Uses thiserror for derive macros. Every variant is fatal to the running
//! command and maps to a process exit code.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for grace-dizmo operations.
#[derive(Error, Debug)]
pub enum DizmoError {
    /// User provided invalid arguments or an unreadable input.
    #[error("{0}")]
    UserError(String),

    /// The requested task or sub-argument is not recognized.
    #[error("{0}")]
    UnknownCommand(String),

    /// A required configuration key is absent.
    #[error("missing key '{key}': {reason}")]
    MissingKey { key: String, reason: String },

    /// A configuration value has the wrong type, is empty, or is not allowed.
    #[error("wrong format for '{key}': {reason}")]
    WrongFormat { key: String, reason: String },

    /// An override tried to change a setting a parent project may not change.
    #[error("key not allowed: {0}")]
    KeyNotAllowed(String),

    /// The store rejected the given username/password.
    #[error("{0}")]
    WrongLoginCredentials(String),

    /// The store answered with a non-success status.
    #[error("Error from store server ({base_url}): {message} - Error Nr.: {number}")]
    RemoteServer {
        base_url: String,
        message: String,
        number: i64,
    },

    /// The store refused an uploaded archive.
    #[error("Upload to store server ({base_url}) failed: {message} - Error Nr.: {number}")]
    FileUpload {
        base_url: String,
        message: String,
        number: i64,
    },

    /// The HTTP exchange itself failed (connection, TLS, body decoding).
    #[error("request to store failed: {0}")]
    Http(String),

    /// A file or directory could not be written.
    #[error("{0}")]
    FileNotWritable(String),

    /// An existing folder could not be removed.
    #[error("{0}")]
    RemoveFolder(String),

    /// A required file does not exist.
    #[error("{0}")]
    FileNotFound(String),
}

impl DizmoError {
    /// Build a `MissingKey` error.
    pub fn missing(key: impl Into<String>, reason: impl Into<String>) -> Self {
        DizmoError::MissingKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Build a `WrongFormat` error.
    pub fn wrong_format(key: impl Into<String>, reason: impl Into<String>) -> Self {
        DizmoError::WrongFormat {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// The configuration key this error is about, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            DizmoError::MissingKey { key, .. } | DizmoError::WrongFormat { key, .. } => {
                Some(key.as_str())
            }
            _ => None,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DizmoError::UserError(_) | DizmoError::UnknownCommand(_) => exit_codes::USER_ERROR,
            DizmoError::MissingKey { .. }
            | DizmoError::WrongFormat { .. }
            | DizmoError::KeyNotAllowed(_) => exit_codes::CONFIG_ERROR,
            DizmoError::WrongLoginCredentials(_)
            | DizmoError::RemoteServer { .. }
            | DizmoError::FileUpload { .. }
            | DizmoError::Http(_) => exit_codes::STORE_FAILURE,
            DizmoError::FileNotWritable(_)
            | DizmoError::RemoveFolder(_)
            | DizmoError::FileNotFound(_) => exit_codes::FILESYSTEM_FAILURE,
        }
    }
}

impl From<reqwest::Error> for DizmoError {
    fn from(err: reqwest::Error) -> Self {
        DizmoError::Http(err.to_string())
    }
}

/// Result type alias for grace-dizmo operations.
pub type Result<T> = std::result::Result<T, DizmoError>;
