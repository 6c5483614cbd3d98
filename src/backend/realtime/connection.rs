/**
 * Viewer Connection Handler
 *
 * This module runs one live viewer connection from accept to close:
 *
 * 1. Register a `ConnectionHandle` (fresh id, bounded outbound channel)
 * 2. Loop, applying inbound frames through the subscription protocol and
 *    writing queued location payloads to the transport
 * 3. On close (either side), transport error, or a failed write, unregister
 *    the connection before returning
 *
 * # Transports
 *
 * The handler is generic over `ViewerTransport`, which only needs to
 * receive the next text frame, send a text payload, and close. Axum's
 * `WebSocket` implements it; tests drive the handler over plain channels.
 *
 * # Endpoint
 *
 * `GET /ws` requires a parent session, sent either as an
 * `Authorization: Bearer` header or as a `token` query parameter (browsers
 * cannot set headers on a WebSocket handshake). The upgraded socket is
 * served with the session's producer identity as its subscription scope.
 */

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::{header::AUTHORIZATION, HeaderMap},
    response::Response,
};
use serde::Deserialize;
use thiserror::Error;

use crate::backend::auth::sessions::Role;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::authenticate;
use crate::backend::realtime::registry::{ConnectionHandle, ConnectionRegistry};
use crate::backend::realtime::subscription::handle_viewer_message;
use crate::backend::server::state::AppState;
use crate::shared::ProducerId;

/// Failure writing to a transport
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport closed")]
    Closed,
    #[error("transport error: {0}")]
    Io(String),
}

/// Bidirectional channel to one viewer
#[async_trait]
pub trait ViewerTransport: Send {
    /// Next inbound text frame, or `None` once the connection is gone
    async fn recv(&mut self) -> Option<String>;

    /// Send one text payload
    async fn send(&mut self, payload: String) -> Result<(), TransportError>;

    /// Close the connection from the server side
    async fn close(&mut self);
}

#[async_trait]
impl ViewerTransport for WebSocket {
    async fn recv(&mut self) -> Option<String> {
        while let Some(frame) = WebSocket::recv(self).await {
            match frame {
                Ok(Message::Text(text)) => return Some(text.as_str().to_owned()),
                Ok(Message::Binary(bytes)) => match String::from_utf8(bytes.to_vec()) {
                    Ok(text) => return Some(text),
                    Err(_) => tracing::debug!("Ignoring non UTF-8 binary frame"),
                },
                Ok(Message::Close(_)) => return None,
                // Pings are answered by axum
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "WebSocket receive error");
                    return None;
                }
            }
        }
        None
    }

    async fn send(&mut self, payload: String) -> Result<(), TransportError> {
        WebSocket::send(self, Message::Text(payload.into()))
            .await
            .map_err(|e| TransportError::Io(e.to_string()))
    }

    async fn close(&mut self) {
        let _ = WebSocket::send(self, Message::Close(None)).await;
    }
}

/// Run a viewer connection until it closes
///
/// The connection is registered for the whole loop and unregistered before
/// this function returns, whatever ended the loop. Only subscriptions to
/// `scope` are accepted.
pub async fn serve_connection<T: ViewerTransport>(
    mut transport: T,
    registry: Arc<ConnectionRegistry>,
    channel_capacity: usize,
    scope: ProducerId,
) {
    let (handle, mut outbound) = ConnectionHandle::channel(channel_capacity);
    let connection_id = handle.id();
    registry.register(handle).await;

    tracing::info!(connection_id = %connection_id, scope = %scope, "Viewer connection established");

    loop {
        tokio::select! {
            inbound = transport.recv() => match inbound {
                Some(text) => {
                    if let Err(e) = handle_viewer_message(&registry, connection_id, &scope, &text).await {
                        tracing::debug!(connection_id = %connection_id, error = %e, "Ignoring viewer message");
                    }
                }
                None => {
                    tracing::info!(connection_id = %connection_id, "Viewer closed connection");
                    break;
                }
            },
            payload = outbound.recv() => match payload {
                Some(payload) => {
                    let json = match serde_json::to_string(payload.as_ref()) {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!(connection_id = %connection_id, error = %e, "Failed to serialize payload");
                            continue;
                        }
                    };
                    if let Err(e) = transport.send(json).await {
                        tracing::warn!(connection_id = %connection_id, error = %e, "Viewer send failed");
                        break;
                    }
                }
                // Every sender is gone: the entry was removed elsewhere
                None => break,
            },
        }
    }

    registry.unregister(connection_id).await;
    transport.close().await;

    tracing::info!(connection_id = %connection_id, "Viewer connection terminated");
}

/// Query string accepted on `GET /ws`
#[derive(Debug, Default, Deserialize)]
pub struct ViewerAuthQuery {
    pub token: Option<String>,
}

/// Handle a viewer WebSocket upgrade (GET /ws)
///
/// Requires a parent session (401 without a valid token, 403 for a child).
/// After the upgrade the viewer sends
/// `{"type":"subscribe","producerIdentity":"<id>"}` naming its own producer
/// identity to start receiving location payloads.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    Query(query): Query<ViewerAuthQuery>,
    headers: HeaderMap,
) -> Result<Response, BackendError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_owned)
        .or(query.token)
        .ok_or_else(|| {
            tracing::warn!("Viewer connection without a session token");
            BackendError::unauthorized("Missing token")
        })?;

    let viewer = authenticate(&app_state, &token).await?;
    viewer.require(Role::Parent)?;

    let registry = app_state.registry.clone();
    let capacity = app_state.config.viewer_channel_capacity;
    let scope = viewer.producer;
    Ok(ws.on_upgrade(move |socket| serve_connection(socket, registry, capacity, scope)))
}
