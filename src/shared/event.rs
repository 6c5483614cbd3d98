/**
 * Viewer Wire Messages
 *
 * This module defines the two JSON shapes exchanged with live viewers:
 *
 * - `ViewerMessage` - inbound, sent by a viewer to declare interest
 * - `LocationPayload` - outbound, pushed to a viewer for each stored report
 *
 * # Inbound
 *
 * ```json
 * { "type": "subscribe", "producerIdentity": "parent:42" }
 * ```
 *
 * # Outbound
 *
 * ```json
 * { "entityIdentity": "child:7", "producerIdentity": "parent:42",
 *   "latitude": 10.0, "longitude": 20.0, "timestamp": 1000 }
 * ```
 */
use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::error::SharedError;
use crate::shared::location::{EntityId, LocationReport, ProducerId};

/// Message sent by a viewer over its live connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewerMessage {
    /// Watch one producer identity, replacing any previous subscription
    Subscribe {
        #[serde(rename = "producerIdentity", deserialize_with = "identity_from_json")]
        producer_identity: ProducerId,
    },
}

impl ViewerMessage {
    /// Parse a text frame received from a viewer
    ///
    /// Unknown `type` values, missing fields and invalid JSON are all
    /// reported as `SharedError::MalformedMessage`.
    pub fn parse(text: &str) -> Result<Self, SharedError> {
        serde_json::from_str(text).map_err(|e| SharedError::malformed(e.to_string()))
    }

    pub fn subscribe(producer: impl Into<ProducerId>) -> Self {
        Self::Subscribe {
            producer_identity: producer.into(),
        }
    }
}

/// Accept identities sent as JSON strings or integers
fn identity_from_json<'de, D>(deserializer: D) -> Result<ProducerId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawIdentity {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawIdentity::deserialize(deserializer)? {
        RawIdentity::Text(id) => ProducerId::new(id),
        RawIdentity::Signed(id) => ProducerId::new(id.to_string()),
        RawIdentity::Unsigned(id) => ProducerId::new(id.to_string()),
    })
}

/// Location update pushed to subscribed viewers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPayload {
    pub entity_identity: EntityId,
    pub producer_identity: ProducerId,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: i64,
}

impl From<&LocationReport> for LocationPayload {
    fn from(report: &LocationReport) -> Self {
        Self {
            entity_identity: report.entity.clone(),
            producer_identity: report.producer.clone(),
            latitude: report.latitude,
            longitude: report.longitude,
            timestamp: report.timestamp,
        }
    }
}
