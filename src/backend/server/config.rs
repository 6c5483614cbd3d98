/**
 * Server Configuration
 *
 * This module loads server configuration from environment variables (a
 * `.env` file is read by the binary before this runs) and opens the
 * optional PostgreSQL database.
 *
 * # Variables
 *
 * - `SERVER_PORT` - listen port (default 3000)
 * - `DATABASE_URL` - PostgreSQL URL; when unset, accounts are disabled and
 *   locations are kept in memory
 * - `JWT_SECRET` - HMAC secret for session tokens
 * - `VIEWER_CHANNEL_CAPACITY` - per-viewer outbound buffer (default 64)
 *
 * # Error Handling
 *
 * Bad or missing values fall back to defaults with a warning. A database
 * that cannot be reached is logged and treated as not configured; the
 * server still starts.
 */

use sqlx::PgPool;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_VIEWER_CHANNEL_CAPACITY: usize = 64;
const DEV_JWT_SECRET: &str = "safetrack-dev-secret-change-in-production";

/// Database configuration result
pub type DatabaseConfig = Option<PgPool>;

/// Runtime configuration of the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub viewer_channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            viewer_channel_capacity: DEFAULT_VIEWER_CHANNEL_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("Invalid SERVER_PORT {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                tracing::warn!("Missing JWT_SECRET, using the development secret");
                defaults.jwt_secret
            }
        };

        let viewer_channel_capacity = match lookup("VIEWER_CHANNEL_CAPACITY") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    tracing::warn!(
                        "Invalid VIEWER_CHANNEL_CAPACITY {:?}, using {}",
                        raw,
                        DEFAULT_VIEWER_CHANNEL_CAPACITY
                    );
                    DEFAULT_VIEWER_CHANNEL_CAPACITY
                }
            },
            None => defaults.viewer_channel_capacity,
        };

        Self {
            port,
            database_url,
            jwt_secret,
            viewer_channel_capacity,
        }
    }
}

/// Connect to the database and run migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is reachable
/// - `None` if `database_url` is `None` or the connection fails
pub async fn load_database(database_url: Option<&str>) -> DatabaseConfig {
    let database_url = match database_url {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set. Accounts disabled, locations kept in memory.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            // Migrations may already be applied by an operator
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
