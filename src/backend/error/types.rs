/**
 * Backend Error Types
 *
 * This module defines the errors returned by HTTP handlers. Each variant
 * maps to an HTTP status code and a client-safe message.
 *
 * # Error Categories
 *
 * ## Request Errors
 *
 * - Invalid input (400), conflicts (409), unknown resources (404)
 * - Missing or invalid bearer token (401)
 * - Token valid but wrong role for the route (403)
 *
 * ## Service Errors
 *
 * - Database not configured (503)
 * - Database, storage or ingest failures (500). Details are logged, not
 *   returned to the client.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::location::ingest::IngestError;
use crate::backend::location::store::StorageError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use safetrack::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// let err = BackendError::unauthorized("Missing Authorization header");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status (validation, conflict, not found)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Missing, malformed or invalid credentials
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Authenticated, but the account's role may not use this route
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// `DATABASE_URL` is not configured
    #[error("Database not configured")]
    DatabaseUnavailable,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Location could not be stored
    #[error(transparent)]
    IngestError(#[from] IngestError),

    /// Location history could not be read
    #[error(transparent)]
    StorageError(#[from] StorageError),

    /// Internal failure (hashing, token signing)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IngestError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message
    ///
    /// Server-side failures get a generic message; the detail is only logged.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Unauthorized { message } => message.clone(),
            Self::Forbidden { message } => message.clone(),
            Self::DatabaseUnavailable => "Database not configured".to_string(),
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::IngestError(_) => "Failed to store location".to_string(),
            Self::StorageError(_) => "Failed to read locations".to_string(),
            Self::Internal { .. } => "Server error".to_string(),
        }
    }
}
