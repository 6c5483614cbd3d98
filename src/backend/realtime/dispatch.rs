/**
 * Fan-out Dispatcher
 *
 * Delivers a stored location report to every live connection subscribed to
 * the report's producer identity.
 *
 * # Delivery
 *
 * Each matching connection gets a non-blocking `try_send` into its bounded
 * outbound channel; the connection's own task writes to the socket. A slow
 * or dead viewer therefore never holds up the others, and a failed send is
 * logged and counted without aborting the batch.
 *
 * The dispatcher never unregisters a connection. Removal belongs to the
 * connection's close path alone, so there is exactly one mutation path for
 * closing.
 *
 * # Guarantees
 *
 * - At-most-once per live connection per report; nothing is buffered for
 *   viewers that are disconnected.
 * - Per connection, payloads arrive in dispatch order (FIFO channel).
 */

use std::sync::Arc;

use crate::backend::realtime::registry::ConnectionRegistry;
use crate::shared::{LocationPayload, LocationReport};

/// Outcome of one dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Connections the payload was queued for
    pub delivered: usize,
    /// Connections whose send failed (closed or full)
    pub failed: usize,
}

/// Fan-out over the shared connection registry
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ConnectionRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Push `report` to every connection subscribed to its producer
    pub async fn dispatch(&self, report: &LocationReport) -> DispatchSummary {
        let targets = self.registry.connections_for(&report.producer).await;
        if targets.is_empty() {
            tracing::debug!(producer = %report.producer, "[Realtime] No live viewers for report");
            return DispatchSummary::default();
        }

        let payload = Arc::new(LocationPayload::from(report));
        let mut summary = DispatchSummary::default();

        for connection in targets {
            match connection.try_deliver(payload.clone()) {
                Ok(()) => summary.delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection.id(),
                        producer = %report.producer,
                        error = %e,
                        "[Realtime] Delivery failed"
                    );
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            producer = %report.producer,
            entity = %report.entity,
            delivered = summary.delivered,
            failed = summary.failed,
            "[Realtime] Location dispatched"
        );
        summary
    }
}
