//! Shared Module
//!
//! This module contains types that are shared between the server and its
//! clients. All types are designed for JSON serialization over HTTP and
//! WebSocket frames.

/// Identities and location reports
pub mod location;

/// Viewer wire messages
pub mod event;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use location::{EntityId, LocationReport, ProducerId};
pub use event::{LocationPayload, ViewerMessage};
pub use error::SharedError;
