/**
 * Parent and Child Accounts
 *
 * This module handles account data and database operations. Parents sign up
 * on their own; children are created by an authenticated parent and stay
 * linked to that parent through `parent_id`.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Parent account row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Parent {
    /// Unique parent ID (UUID), also the producer identity of the family
    pub id: Uuid,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Child account row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Child {
    /// Unique child ID (UUID), used as the entity identity of reports
    pub id: Uuid,
    /// Parent this child reports to
    pub parent_id: Uuid,
    /// Username (unique among children)
    pub username: String,
    /// Name shown to the parent
    pub display_name: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Create a new parent
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - Chosen username
/// * `email` - Email address
/// * `password_hash` - Hashed password
pub async fn create_parent(
    pool: &PgPool,
    username: String,
    email: String,
    password_hash: String,
) -> Result<Parent, sqlx::Error> {
    let parent = sqlx::query_as::<_, Parent>(
        r#"
        INSERT INTO parents (id, username, email, password_hash, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, username, email, password_hash, created_at
        "#
    )
    .bind(Uuid::new_v4())
    .bind(&username)
    .bind(&email)
    .bind(&password_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(parent)
}

/// Get parent by email
pub async fn get_parent_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<Parent>, sqlx::Error> {
    let parent = sqlx::query_as::<_, Parent>(
        r#"
        SELECT id, username, email, password_hash, created_at
        FROM parents
        WHERE email = $1
        "#
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(parent)
}

/// Get parent by username
pub async fn get_parent_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<Parent>, sqlx::Error> {
    let parent = sqlx::query_as::<_, Parent>(
        r#"
        SELECT id, username, email, password_hash, created_at
        FROM parents
        WHERE username = $1
        "#
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(parent)
}

/// Get parent by ID
pub async fn get_parent_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Parent>, sqlx::Error> {
    let parent = sqlx::query_as::<_, Parent>(
        r#"
        SELECT id, username, email, password_hash, created_at
        FROM parents
        WHERE id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(parent)
}

/// Create a child linked to `parent_id`
pub async fn create_child(
    pool: &PgPool,
    parent_id: Uuid,
    username: String,
    display_name: String,
    password_hash: String,
) -> Result<Child, sqlx::Error> {
    let child = sqlx::query_as::<_, Child>(
        r#"
        INSERT INTO children (id, parent_id, username, display_name, password_hash, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, parent_id, username, display_name, password_hash, created_at
        "#
    )
    .bind(Uuid::new_v4())
    .bind(parent_id)
    .bind(&username)
    .bind(&display_name)
    .bind(&password_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(child)
}

/// Get child by username
pub async fn get_child_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<Child>, sqlx::Error> {
    let child = sqlx::query_as::<_, Child>(
        r#"
        SELECT id, parent_id, username, display_name, password_hash, created_at
        FROM children
        WHERE username = $1
        "#
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(child)
}

/// Get child by ID
pub async fn get_child_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Child>, sqlx::Error> {
    let child = sqlx::query_as::<_, Child>(
        r#"
        SELECT id, parent_id, username, display_name, password_hash, created_at
        FROM children
        WHERE id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(child)
}

/// List a parent's children, oldest first
pub async fn list_children(
    pool: &PgPool,
    parent_id: Uuid,
) -> Result<Vec<Child>, sqlx::Error> {
    let children = sqlx::query_as::<_, Child>(
        r#"
        SELECT id, parent_id, username, display_name, password_hash, created_at
        FROM children
        WHERE parent_id = $1
        ORDER BY created_at ASC
        "#
    )
    .bind(parent_id)
    .fetch_all(pool)
    .await?;

    Ok(children)
}
