//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs             - Module exports and documentation
//! ├── router.rs          - Main router creation
//! ├── realtime_routes.rs - WebSocket and health routes
//! └── api_routes.rs      - Account and location endpoints
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use safetrack::backend::location::MemoryLocationStore;
//! use safetrack::backend::routes::create_router;
//! use safetrack::backend::server::{AppState, ServerConfig};
//!
//! let app_state = AppState::new(ServerConfig::default(), None, Arc::new(MemoryLocationStore::new()));
//! let router = create_router(app_state);
//! ```

/// Main router creation
pub mod router;

/// Real-time route handlers
pub mod realtime_routes;

/// API endpoint handlers
pub mod api_routes;

pub use realtime_routes::HealthResponse;
pub use router::create_router;
