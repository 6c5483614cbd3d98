/**
 * Application State Management
 *
 * This module defines the application state shared by every handler and
 * the `FromRef` implementations that let handlers extract only the part
 * they need.
 *
 * # Contents
 *
 * - Server configuration (JWT secret, viewer buffer size)
 * - The connection registry shared by all viewer connections
 * - The location ingest pipeline (store + dispatcher)
 * - The optional PostgreSQL pool used for accounts
 *
 * # Thread Safety
 *
 * Everything is behind `Arc` or is itself cheap to clone; the registry does
 * its own locking.
 */

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::location::ingest::LocationIngest;
use crate::backend::location::store::LocationStore;
use crate::backend::realtime::dispatch::Dispatcher;
use crate::backend::realtime::registry::ConnectionRegistry;
use crate::backend::server::config::ServerConfig;

/// Application state
///
/// # Usage
///
/// ```rust,no_run
/// use safetrack::backend::server::state::AppState;
/// use axum::extract::State;
///
/// async fn handler(State(app_state): State<AppState>) {
///     let live = app_state.registry.len().await;
/// }
/// ```
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,

    /// Live viewer connections
    pub registry: Arc<ConnectionRegistry>,

    /// Store-then-dispatch pipeline for location reports
    pub ingest: LocationIngest,

    /// Database connection pool
    ///
    /// `None` if `DATABASE_URL` is not configured. Account handlers answer
    /// 503 in that case.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// Assemble state around a location store
    pub fn new(config: ServerConfig, db_pool: Option<PgPool>, store: Arc<dyn LocationStore>) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let ingest = LocationIngest::new(store, Dispatcher::new(registry.clone()));

        Self {
            config: Arc::new(config),
            registry,
            ingest,
            db_pool,
        }
    }
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<ConnectionRegistry> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}

impl FromRef<AppState> for LocationIngest {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.ingest.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
