//! Backend Module
//!
//! This module contains all server-side code for SafeTrack: an Axum HTTP
//! server that accepts child location reports, stores them, and pushes them
//! to parents watching over WebSocket connections.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`realtime`** - Connection registry, subscription protocol, fan-out
//! - **`location`** - Location storage, ingest pipeline, HTTP handlers
//! - **`auth`** - Parent/child accounts, password hashing, JWT sessions
//! - **`middleware`** - Bearer token authentication
//! - **`error`** - Backend error types and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── realtime/       - Live viewer delivery
//! ├── location/       - Location ingest and storage
//! ├── auth/           - Accounts and sessions
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the configuration, the connection registry, the ingest
//! pipeline and the optional database pool. The registry is shared through
//! `Arc` and guarded by a `tokio::sync::RwLock`; each viewer connection owns
//! a bounded channel the dispatcher enqueues into without waiting.
//!
//! # Error Handling
//!
//! - `BackendError` for HTTP handlers, converted into JSON error responses
//! - `RealtimeError` for per-connection problems, logged and never fatal
//! - `IngestError::StorageFailure` when a report could not be stored
//!
//! # Example
//!
//! ```rust,no_run
//! use safetrack::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::default()).await;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Live viewer delivery
pub mod realtime;

/// Location ingest and storage
pub mod location;

/// Backend error types
pub mod error;

/// Accounts and sessions
pub mod auth;

/// Middleware for request processing
pub mod middleware;

pub use error::BackendError;
pub use server::create_app;
