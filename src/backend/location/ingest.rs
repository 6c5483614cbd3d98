/**
 * Location Ingest
 *
 * Accepts a location report, stores it, and hands it to the fan-out
 * dispatcher.
 *
 * # Ordering
 *
 * 1. `persist` on the location store
 * 2. On success, `dispatch` exactly once, then acknowledge
 * 3. On failure, return `IngestError::StorageFailure` and dispatch nothing
 *
 * Live viewers therefore only ever see reports that are already durable.
 * There is no retry here; a failed write is terminal for the request.
 *
 * # Validation
 *
 * Identities come from the caller's verified session and are trusted.
 * Coordinates are not range checked and the timestamp is taken as given.
 */

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::location::store::{LocationStore, StorageError};
use crate::backend::realtime::dispatch::Dispatcher;
use crate::shared::{LocationReport, ProducerId};

/// Acknowledgement text returned for every stored report
pub const ACK_MESSAGE: &str = "Location received";

/// Ingest failures surfaced to the caller
#[derive(Debug, Error)]
pub enum IngestError {
    /// The report was not durably stored; it was not dispatched
    #[error("Storage failure: {0}")]
    StorageFailure(#[from] StorageError),
}

/// Acknowledgement of a stored report
///
/// Echoes the stored coordinates and timestamp, plus how many live viewers
/// the report was queued for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: i64,
    pub delivered: usize,
}

/// Store-then-dispatch pipeline for location reports
#[derive(Clone)]
pub struct LocationIngest {
    store: Arc<dyn LocationStore>,
    dispatcher: Dispatcher,
}

impl LocationIngest {
    pub fn new(store: Arc<dyn LocationStore>, dispatcher: Dispatcher) -> Self {
        Self { store, dispatcher }
    }

    /// Store `report` and, once stored, push it to live viewers
    pub async fn ingest(&self, report: LocationReport) -> Result<Ack, IngestError> {
        tracing::info!(
            producer = %report.producer,
            entity = %report.entity,
            latitude = report.latitude,
            longitude = report.longitude,
            timestamp = report.timestamp,
            "Received location"
        );

        if let Err(e) = self.store.persist(&report).await {
            tracing::error!(
                producer = %report.producer,
                entity = %report.entity,
                error = %e,
                "Failed to store location, not dispatching"
            );
            return Err(e.into());
        }

        let summary = self.dispatcher.dispatch(&report).await;

        Ok(Ack {
            message: ACK_MESSAGE.to_string(),
            latitude: report.latitude,
            longitude: report.longitude,
            timestamp: report.timestamp,
            delivered: summary.delivered,
        })
    }

    /// Stored history for a producer (read path, no dispatch)
    pub async fn history(&self, producer: &ProducerId) -> Result<Vec<LocationReport>, StorageError> {
        self.store.query_by_producer(producer).await
    }
}

impl std::fmt::Debug for LocationIngest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationIngest")
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}
