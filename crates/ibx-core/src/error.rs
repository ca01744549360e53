//! Error types for the object-management layer
//!
//! Every fallible operation in the workspace returns [`Error`]. Errors raised
//! by a [`Connector`](crate::traits::Connector) are handed back to callers of
//! the [`ObjectManager`](crate::ObjectManager) untouched.

use thiserror::Error;

/// Result type alias for object-management operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Required identifying fields are missing; raised before any network call.
    ///
    /// The message is shown to the caller exactly as constructed.
    #[error("{0}")]
    Validation(String),

    /// Arguments that cannot form a valid request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level failures (connect, TLS, timeout, unreadable body)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Credentials were rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Credentials were accepted but lack permission for the operation
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Object not found
    #[error("Object not found: {0}")]
    NotFound(String),

    /// The remote system refused the change because of conflicting state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Error reported by the remote API in its own error envelope
    #[error("WAPI error ({code}): {message}")]
    Wapi {
        /// Machine-readable error code (e.g. `Client.Ibap.Proto`)
        code: String,
        /// Human-readable message
        message: String,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create an access denied error
    pub fn access_denied(msg: impl Into<String>) -> Self {
        Self::AccessDenied(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an error from the remote API's error envelope
    pub fn wapi(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Wapi {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
