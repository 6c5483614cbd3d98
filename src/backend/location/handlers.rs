/**
 * Location HTTP Handlers
 *
 * - POST /api/location (and the `/updateLocation` alias): a child reports
 *   its position. Producer and entity identities come from the session
 *   token, never from the body.
 * - GET /api/locations: a parent reads the stored history of its producer
 *   identity, oldest first.
 */

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use crate::backend::auth::sessions::Role;
use crate::backend::error::BackendError;
use crate::backend::location::ingest::{Ack, LocationIngest};
use crate::backend::middleware::auth::AuthUser;
use crate::shared::{EntityId, LocationPayload, LocationReport};

/// Body of a location report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Client-reported time, taken as given
    pub timestamp: i64,
}

/// Report the calling child's location
///
/// # Errors
///
/// * `401 Unauthorized` - missing or invalid token
/// * `403 Forbidden` - caller is not a child
/// * `500 Internal Server Error` - the report could not be stored; nothing
///   was pushed to viewers
///
/// # Example Response
///
/// ```json
/// {
///   "message": "Location received",
///   "latitude": 10.0,
///   "longitude": 20.0,
///   "timestamp": 1000,
///   "delivered": 1
/// }
/// ```
pub async fn post_location(
    State(ingest): State<LocationIngest>,
    AuthUser(user): AuthUser,
    Json(request): Json<LocationRequest>,
) -> Result<Json<Ack>, BackendError> {
    user.require(Role::Child)?;

    let report = LocationReport::new(
        user.producer.clone(),
        EntityId::from(user.account_id),
        request.latitude,
        request.longitude,
        request.timestamp,
    );

    let ack = ingest.ingest(report).await?;
    Ok(Json(ack))
}

/// Stored location history of the calling parent's producer identity
pub async fn get_locations(
    State(ingest): State<LocationIngest>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<LocationPayload>>, BackendError> {
    user.require(Role::Parent)?;

    let reports = ingest.history(&user.producer).await.map_err(|e| {
        tracing::error!(producer = %user.producer, "Failed to load location history: {}", e);
        BackendError::from(e)
    })?;

    tracing::debug!(producer = %user.producer, "Returning {} stored locations", reports.len());

    Ok(Json(reports.iter().map(LocationPayload::from).collect()))
}
