/**
 * Connection Registry
 *
 * The authoritative set of live viewer connections and the producer identity
 * each one is subscribed to. A connection is represented by a
 * `ConnectionHandle`: its id plus the sending half of the bounded channel
 * that its own task drains to the socket.
 *
 * # Invariants
 *
 * - An entry exists only while its connection is open. The connection task
 *   awaits `unregister` as the last thing it does, so a lookup never hands
 *   out a handle for a connection that has finished closing.
 * - A connection has at most one subscription; `set_subscription` overwrites.
 *
 * # Concurrency
 *
 * All entries live in one `HashMap` behind a `tokio::sync::RwLock`. Mutators
 * take the write lock, `connections_for` takes the read lock, so a subscribe
 * racing a dispatch is either fully visible to it or not at all.
 */

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::backend::realtime::error::{DeliveryFailureReason, RealtimeError};
use crate::shared::{LocationPayload, ProducerId};

/// Identifier assigned to a viewer connection when it is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outbound half of a viewer connection
pub type ViewerSender = mpsc::Sender<Arc<LocationPayload>>;

/// Receiving end drained by the connection task
pub type ViewerReceiver = mpsc::Receiver<Arc<LocationPayload>>;

/// Handle used to deliver payloads to one live connection
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    sender: ViewerSender,
}

impl ConnectionHandle {
    pub fn new(id: ConnectionId, sender: ViewerSender) -> Self {
        Self { id, sender }
    }

    /// Create a handle with a fresh id and its paired receiver
    pub fn channel(capacity: usize) -> (Self, ViewerReceiver) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self::new(ConnectionId::new(), sender), receiver)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue a payload without waiting for buffer space
    pub fn try_deliver(&self, payload: Arc<LocationPayload>) -> Result<(), RealtimeError> {
        self.sender.try_send(payload).map_err(|e| {
            let reason = match e {
                mpsc::error::TrySendError::Full(_) => DeliveryFailureReason::Full,
                mpsc::error::TrySendError::Closed(_) => DeliveryFailureReason::Closed,
            };
            RealtimeError::DeliveryFailure {
                connection_id: self.id,
                reason,
            }
        })
    }
}

#[derive(Debug)]
struct Entry {
    handle: ConnectionHandle,
    subscription: Option<ProducerId>,
}

/// Registry of live viewer connections
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, Entry>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a newly accepted connection with no subscription
    pub async fn register(&self, handle: ConnectionHandle) {
        let connection_id = handle.id();
        let mut connections = self.connections.write().await;
        connections.insert(
            connection_id,
            Entry {
                handle,
                subscription: None,
            },
        );
        tracing::debug!(connection_id = %connection_id, "Connection registered");
    }

    /// Point a connection at a producer identity, replacing any previous one
    ///
    /// Returns `UnknownConnection` if the connection is no longer registered.
    /// Callers treat that as a benign race with connection close.
    pub async fn set_subscription(
        &self,
        connection_id: ConnectionId,
        producer: ProducerId,
    ) -> Result<(), RealtimeError> {
        let mut connections = self.connections.write().await;
        match connections.get_mut(&connection_id) {
            Some(entry) => {
                tracing::info!(
                    connection_id = %connection_id,
                    producer = %producer,
                    "Connection subscribed"
                );
                entry.subscription = Some(producer);
                Ok(())
            }
            None => Err(RealtimeError::UnknownConnection(connection_id)),
        }
    }

    /// Remove a connection. Removing an unknown id is a no-op.
    ///
    /// Returns whether an entry was removed.
    pub async fn unregister(&self, connection_id: ConnectionId) -> bool {
        let mut connections = self.connections.write().await;
        let removed = connections.remove(&connection_id).is_some();
        if removed {
            tracing::debug!(connection_id = %connection_id, "Connection unregistered");
        }
        removed
    }

    /// Live connections currently subscribed to `producer`
    pub async fn connections_for(&self, producer: &ProducerId) -> Vec<ConnectionHandle> {
        let connections = self.connections.read().await;
        connections
            .values()
            .filter(|entry| entry.subscription.as_ref() == Some(producer))
            .map(|entry| entry.handle.clone())
            .collect()
    }

    /// Current subscription of a connection, if registered and subscribed
    pub async fn subscription_of(&self, connection_id: ConnectionId) -> Option<ProducerId> {
        let connections = self.connections.read().await;
        connections
            .get(&connection_id)
            .and_then(|entry| entry.subscription.clone())
    }

    pub async fn contains(&self, connection_id: ConnectionId) -> bool {
        self.connections.read().await.contains_key(&connection_id)
    }

    /// Number of live connections
    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}
