//! Real-time Delivery Module
//!
//! This module pushes stored location reports to live viewers. It replaces a
//! plain broadcast with delivery keyed by producer identity: a viewer only
//! receives reports for the parent it subscribed to.
//!
//! # Architecture
//!
//! - **`registry`** - Live connections and their current subscription
//! - **`subscription`** - Inbound viewer message handling (`subscribe`)
//! - **`dispatch`** - Fan-out of one report to the matching connections
//! - **`connection`** - Per-connection task and the `/ws` endpoint
//! - **`error`** - Non-fatal errors of this layer
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── registry.rs     - Connection registry
//! ├── subscription.rs - Viewer subscription protocol
//! ├── dispatch.rs     - Fan-out dispatcher
//! ├── connection.rs   - Connection handler and transport trait
//! └── error.rs        - Real-time error types
//! ```
//!
//! # Flow
//!
//! 1. A parent connects to `/ws` with a session token; its task registers a
//!    handle scoped to the session's producer identity
//! 2. The viewer sends `{"type":"subscribe","producerIdentity":"..."}`
//! 3. A child's report is stored by location ingest
//! 4. The dispatcher looks up subscribers of the report's producer and
//!    queues the payload on each connection's channel
//! 5. When the viewer disconnects its task unregisters the handle

/// Live connection registry
pub mod registry;

/// Viewer subscription protocol
pub mod subscription;

/// Fan-out dispatcher
pub mod dispatch;

/// Connection handler and transport abstraction
pub mod connection;

/// Real-time error types
pub mod error;

// Re-export commonly used types and functions
pub use connection::{serve_connection, ws_handler, TransportError, ViewerTransport};
pub use dispatch::{DispatchSummary, Dispatcher};
pub use error::{DeliveryFailureReason, RealtimeError};
pub use registry::{ConnectionHandle, ConnectionId, ConnectionRegistry, ViewerReceiver, ViewerSender};
pub use subscription::handle_viewer_message;
