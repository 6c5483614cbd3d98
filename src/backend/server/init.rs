/**
 * Server Initialization
 *
 * This module builds the Axum application:
 *
 * 1. Open the database (if configured) and run migrations
 * 2. Pick the location store: PostgreSQL when the database is available,
 *    in-memory otherwise
 * 3. Create the connection registry, dispatcher and ingest pipeline
 * 4. Create the router
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::location::store::{LocationStore, MemoryLocationStore, PgLocationStore};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// - Missing database: locations are kept in memory, account routes answer 503
/// - Migration failures: logged but don't prevent startup
pub async fn create_app(config: ServerConfig) -> Router<()> {
    tracing::info!("Initializing SafeTrack backend server");

    let db_pool = load_database(config.database_url.as_deref()).await;

    let store: Arc<dyn LocationStore> = match &db_pool {
        Some(pool) => Arc::new(PgLocationStore::new(pool.clone())),
        None => {
            tracing::warn!("Using in-memory location store; history is lost on restart");
            Arc::new(MemoryLocationStore::new())
        }
    };

    let app_state = AppState::new(config, db_pool, store);

    tracing::info!("Connection registry and location ingest initialized");

    create_router(app_state)
}
