/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and during startup, and can be
 * converted to HTTP responses.
 *
 * # Error Types
 *
 * - `HandlerError` - Errors that occur in HTTP handlers
 * - `StartupError` - Errors while wiring the server (logging, listener)
 * - `IoError` - I/O failures
 * - `ConfigError` - Configuration loading failures
 * - `SharedError` - Errors from the shared module
 * - `SerializationError` - JSON errors
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Handler errors occur when processing HTTP requests:
 * - Malformed request bodies
 * - Failure to build a streaming response
 *
 * ## Startup Errors
 *
 * Startup errors stop the binary before it starts serving:
 * - A global tracing subscriber is already installed
 * - The listener cannot be bound
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::{ConfigError, SharedError};

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use livetail::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., malformed request body)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Startup error (e.g., tracing subscriber already installed)
    #[error("Startup error: {message}")]
    StartupError {
        /// Human-readable error message
        message: String,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new startup error
    pub fn startup(message: impl Into<String>) -> Self {
        Self::StartupError {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError::ValidationError` - 400 Bad Request
    /// - Everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::SharedError(SharedError::SerializationError { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::StartupError { .. }
            | Self::IoError(_)
            | Self::ConfigError(_)
            | Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::StartupError { message } => message.clone(),
            Self::IoError(err) => err.to_string(),
            Self::ConfigError(err) => err.to_string(),
            Self::SharedError(err) => err.to_string(),
            Self::SerializationError(err) => err.to_string(),
        }
    }
}
