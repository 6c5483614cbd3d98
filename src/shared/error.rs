//! Shared Error Types
//!
//! Errors raised while decoding what a viewer sends over the wire.
//!
//! # Usage
//!
//! ```rust
//! use safetrack::shared::error::SharedError;
//!
//! let error = SharedError::malformed("missing field `producerIdentity`");
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Viewer message that is not valid JSON or not a recognised message
    #[error("Malformed message: {message}")]
    MalformedMessage {
        /// Parser diagnostic
        message: String,
    },
}

impl SharedError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedMessage {
            message: message.into(),
        }
    }
}
