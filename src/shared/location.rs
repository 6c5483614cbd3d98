/**
 * Location Data Structures
 *
 * This module defines the identities and the location report that flow
 * from a child's device, through ingest and storage, out to live viewers.
 *
 * Identities are opaque strings. Accounts created by this server use their
 * UUID rendered as a string, but callers may supply any identifier.
 */
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity grouping a parent and the children reporting to them
///
/// Viewers subscribe to a producer identity; every report carrying the
/// same identity is delivered to them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProducerId(String);

impl ProducerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProducerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProducerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<uuid::Uuid> for ProducerId {
    fn from(id: uuid::Uuid) -> Self {
        Self(id.to_string())
    }
}

/// Identity of one location-emitting child within a producer's group
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<uuid::Uuid> for EntityId {
    fn from(id: uuid::Uuid) -> Self {
        Self(id.to_string())
    }
}

/// A single position report
///
/// Created on ingest and never mutated afterwards. The timestamp is the
/// one supplied by the reporting device; the server does not check it
/// against its own clock, and coordinates are not range checked.
///
/// # Example
/// ```rust
/// use safetrack::shared::LocationReport;
///
/// let report = LocationReport::new("parent:42", "child:7", 10.0, 20.0, 1000);
/// assert_eq!(report.producer.as_str(), "parent:42");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationReport {
    /// Producer (parent) the report belongs to
    pub producer: ProducerId,
    /// Child that emitted the report
    pub entity: EntityId,
    pub latitude: f64,
    pub longitude: f64,
    /// Caller-supplied timestamp
    pub timestamp: i64,
}

impl LocationReport {
    pub fn new(
        producer: impl Into<ProducerId>,
        entity: impl Into<EntityId>,
        latitude: f64,
        longitude: f64,
        timestamp: i64,
    ) -> Self {
        Self {
            producer: producer.into(),
            entity: entity.into(),
            latitude,
            longitude,
            timestamp,
        }
    }
}
