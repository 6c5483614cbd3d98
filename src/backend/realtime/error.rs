/**
 * Real-time Error Types
 *
 * Errors raised inside the live-delivery layer. None of these reach an HTTP
 * caller: malformed viewer messages and subscriptions outside the viewer's
 * own producer are dropped, mutations of a connection that already closed
 * are ignored, and per-connection delivery failures are logged and counted
 * by the dispatcher.
 */

use std::fmt;
use thiserror::Error;

use crate::backend::realtime::registry::ConnectionId;
use crate::shared::ProducerId;

/// Why a payload could not be queued for one connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFailureReason {
    /// The connection's task has ended and dropped its receiver
    Closed,
    /// The connection's outbound buffer is full (viewer not keeping up)
    Full,
}

impl fmt::Display for DeliveryFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("channel closed"),
            Self::Full => f.write_str("channel full"),
        }
    }
}

/// Non-fatal errors of the real-time layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RealtimeError {
    /// Inbound viewer message could not be interpreted
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// Viewer asked for a producer its session does not belong to
    #[error("Subscription to {0} not permitted")]
    SubscriptionDenied(ProducerId),

    /// Registry mutation referenced a connection that is no longer registered
    #[error("Unknown connection: {0}")]
    UnknownConnection(ConnectionId),

    /// Sending a payload to one connection failed
    #[error("Delivery to connection {connection_id} failed: {reason}")]
    DeliveryFailure {
        connection_id: ConnectionId,
        reason: DeliveryFailureReason,
    },
}
