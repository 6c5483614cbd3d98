//! SafeTrack - Main Library
//!
//! SafeTrack is the location-tracking backend for a parent/child safety app.
//! Children report GPS positions, the server persists them, and parents
//! watching over a live connection receive each position as soon as it is
//! stored.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between the server and its clients
//!   - Producer/entity identities and location reports
//!   - Viewer wire messages (subscribe in, location payload out)
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and WebSocket viewer endpoint
//!   - Connection registry and fan-out dispatcher
//!   - Location ingest and storage
//!   - Parent/child accounts and JWT sessions
//!
//! # Feature Flags
//!
//! - **`ssr`** - Server build (enabled by default). Pulls in axum, bcrypt,
//!   jsonwebtoken and the tracing subscriber.
//!
//! # Usage
//!
//! ```rust,no_run
//! use safetrack::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() {
//! let app = create_app(ServerConfig::from_env()).await;
//! // Serve `app` with axum::serve
//! # }
//! ```
//!
//! # Real-time Delivery
//!
//! A parent opens `GET /ws?token=<session token>` and sends
//! `{"type":"subscribe","producerIdentity":"<parent id>"}`. Every location
//! report successfully stored for that producer afterwards is pushed to the
//! viewer as `{entityIdentity, producerIdentity, latitude, longitude, timestamp}`.
//! Delivery is at-most-once; missed reports stay queryable through
//! `GET /api/locations`.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
