//! Database test fixtures and utilities
//!
//! Database tests run only when `DATABASE_URL` points at a disposable
//! PostgreSQL database; otherwise they return early.

use sqlx::PgPool;

/// Connect to the test database and run migrations
///
/// Returns `None` when `DATABASE_URL` is not set.
pub async fn test_pool() -> Option<PgPool> {
    let database_url = std::env::var("DATABASE_URL").ok()?;

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to create test database pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// A producer identity no other test run uses
pub fn unique_producer() -> String {
    format!("test-producer-{}", uuid::Uuid::new_v4())
}

/// A username no other test run uses
pub fn unique_username(prefix: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &suffix[..12])
}
