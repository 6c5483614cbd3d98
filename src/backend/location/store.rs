//! Location storage
//!
//! The storage collaborator behind location ingest. Reports are appended and
//! keyed by `(producer, entity, timestamp)`; writing the same key twice is a
//! storage failure. Two implementations:
//!
//! - `PgLocationStore` - PostgreSQL via sqlx (`locations` table)
//! - `MemoryLocationStore` - in-process, used when `DATABASE_URL` is unset
//!   and in tests

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::shared::{EntityId, LocationReport, ProducerId};

/// Errors raised by a location store
#[derive(Debug, Error)]
pub enum StorageError {
    /// A report with the same producer, entity and timestamp already exists
    #[error("Report already stored for {producer}/{entity} at {timestamp}")]
    Duplicate {
        producer: ProducerId,
        entity: EntityId,
        timestamp: i64,
    },

    /// The store refused or could not complete the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    fn duplicate(report: &LocationReport) -> Self {
        Self::Duplicate {
            producer: report.producer.clone(),
            entity: report.entity.clone(),
            timestamp: report.timestamp,
        }
    }
}

/// Durable append-only storage for location reports
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Durably append one report
    async fn persist(&self, report: &LocationReport) -> Result<(), StorageError>;

    /// Every stored report for a producer, oldest timestamp first
    async fn query_by_producer(&self, producer: &ProducerId) -> Result<Vec<LocationReport>, StorageError>;
}

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct PgLocationStore {
    pool: PgPool,
}

impl PgLocationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationStore for PgLocationStore {
    async fn persist(&self, report: &LocationReport) -> Result<(), StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO locations (producer_id, entity_id, latitude, longitude, reported_at, received_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#
        )
        .bind(report.producer.as_str())
        .bind(report.entity.as_str())
        .bind(report.latitude)
        .bind(report.longitude)
        .bind(report.timestamp)
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StorageError::duplicate(report))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn query_by_producer(&self, producer: &ProducerId) -> Result<Vec<LocationReport>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT producer_id, entity_id, latitude, longitude, reported_at
            FROM locations
            WHERE producer_id = $1
            ORDER BY reported_at ASC, received_at ASC
            "#
        )
        .bind(producer.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| LocationReport {
            producer: ProducerId::new(row.get::<String, _>("producer_id")),
            entity: EntityId::new(row.get::<String, _>("entity_id")),
            latitude: row.get("latitude"),
            longitude: row.get("longitude"),
            timestamp: row.get("reported_at"),
        }).collect())
    }
}

/// Key a report is stored under
type ReportKey = (ProducerId, EntityId, i64);

#[derive(Debug, Default)]
struct MemoryReports {
    /// Arrival order
    rows: Vec<LocationReport>,
    keys: HashSet<ReportKey>,
}

/// In-memory store
///
/// Writes can be switched off with `set_fail_writes` to simulate an
/// unavailable database.
#[derive(Debug, Default)]
pub struct MemoryLocationStore {
    reports: RwLock<MemoryReports>,
    fail_writes: AtomicBool,
}

impl MemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `persist` calls fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.reports.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.rows.is_empty()
    }
}

#[async_trait]
impl LocationStore for MemoryLocationStore {
    async fn persist(&self, report: &LocationReport) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }

        let mut reports = self.reports.write().await;
        let key = (report.producer.clone(), report.entity.clone(), report.timestamp);
        if !reports.keys.insert(key) {
            return Err(StorageError::duplicate(report));
        }
        reports.rows.push(report.clone());
        Ok(())
    }

    async fn query_by_producer(&self, producer: &ProducerId) -> Result<Vec<LocationReport>, StorageError> {
        let mut found: Vec<LocationReport> = self
            .reports
            .read()
            .await
            .rows
            .iter()
            .filter(|report| &report.producer == producer)
            .cloned()
            .collect();
        // Stable sort keeps arrival order for equal timestamps
        found.sort_by_key(|report| report.timestamp);
        Ok(found)
    }
}
