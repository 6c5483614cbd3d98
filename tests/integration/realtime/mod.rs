//! Real-time integration tests
//!
//! WebSocket viewers against a server on a real TCP port.
