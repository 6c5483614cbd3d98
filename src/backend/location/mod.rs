//! Location Module
//!
//! Ingest of child location reports: durable storage first, then fan-out
//! to subscribed viewers through the real-time dispatcher.
//!
//! # Module Structure
//!
//! ```text
//! location/
//! ├── mod.rs      - Module exports
//! ├── store.rs    - LocationStore trait, PostgreSQL and in-memory stores
//! ├── ingest.rs   - Store-then-dispatch pipeline
//! └── handlers.rs - HTTP handlers
//! ```

pub mod store;

pub mod ingest;

pub mod handlers;

pub use handlers::{get_locations, post_location, LocationRequest};
pub use ingest::{Ack, IngestError, LocationIngest, ACK_MESSAGE};
pub use store::{LocationStore, MemoryLocationStore, PgLocationStore, StorageError};
