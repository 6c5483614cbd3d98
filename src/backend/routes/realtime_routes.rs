/**
 * Real-time Route Handlers
 *
 * # Routes
 *
 * - `GET /ws` - WebSocket upgrade for viewer connections (parent session)
 * - `GET /health` - liveness plus the number of live viewer connections
 */

use axum::{extract::State, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};

use crate::backend::realtime::connection::ws_handler;
use crate::backend::server::state::AppState;

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub connections: usize,
}

/// Health check handler
pub async fn health(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        connections: app_state.registry.len().await,
    })
}

/// Configure real-time routes
///
/// `/ws` authenticates inside its handler (header or `?token=`), so neither
/// route sits behind the auth middleware.
pub fn configure_realtime_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
}
