/**
 * Viewer Subscription Protocol
 *
 * Interprets text frames received on a viewer connection. The protocol has a
 * single message:
 *
 * ```json
 * { "type": "subscribe", "producerIdentity": "parent:42" }
 * ```
 *
 * which points the connection at that producer identity. Subscribing again
 * simply overwrites, so there is no handshake and no acknowledgement.
 *
 * Each connection is opened with a session whose producer identity is its
 * scope; a subscribe naming any other identity is refused.
 *
 * Anything else (unknown type, missing identity, invalid JSON) is reported
 * back to the caller as an error and otherwise ignored: the subscription is
 * left untouched and the connection stays open.
 */

use crate::backend::realtime::error::RealtimeError;
use crate::backend::realtime::registry::{ConnectionId, ConnectionRegistry};
use crate::shared::{ProducerId, ViewerMessage};

/// Apply one inbound text frame from `connection_id`
///
/// # Errors
///
/// * `MalformedMessage` - frame is not a recognised viewer message
/// * `SubscriptionDenied` - identity is outside the connection's `scope`
/// * `UnknownConnection` - connection closed before the frame was applied
///
/// Both are non-fatal; the connection handler logs them and keeps reading.
pub async fn handle_viewer_message(
    registry: &ConnectionRegistry,
    connection_id: ConnectionId,
    scope: &ProducerId,
    text: &str,
) -> Result<(), RealtimeError> {
    let message = ViewerMessage::parse(text)
        .map_err(|e| RealtimeError::MalformedMessage(e.to_string()))?;

    match message {
        ViewerMessage::Subscribe { producer_identity } => {
            if &producer_identity != scope {
                return Err(RealtimeError::SubscriptionDenied(producer_identity));
            }
            registry.set_subscription(connection_id, producer_identity).await
        }
    }
}
