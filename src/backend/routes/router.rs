/**
 * Router Configuration
 *
 * This module combines all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Real-time routes (WebSocket viewers, health)
 * 2. API routes (accounts, location ingest and history)
 * 3. Fallback handler (404)
 *
 * CORS is permissive, as the mobile and web clients are served from other
 * origins. Every request is traced.
 */

use axum::{http::StatusCode, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::realtime_routes::configure_realtime_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_realtime_routes(Router::new());

    let router = configure_api_routes(router, app_state.clone());

    let router = router.fallback(|| async { BackendError::handler(StatusCode::NOT_FOUND, "Not Found") });

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
