/**
 * Login Handlers
 *
 * POST /api/parents/login and POST /api/children/login.
 *
 * # Authentication Process
 *
 * 1. Look up the account (parents by username or email)
 * 2. Verify password using bcrypt
 * 3. Generate a JWT carrying role and producer identity
 * 4. Return token and account
 *
 * # Security
 *
 * - Unknown account and wrong password both return 401
 * - Passwords are never logged or returned in responses
 */

use axum::{extract::State, response::Json};
use uuid::Uuid;

use crate::backend::auth::accounts::{get_child_by_username, get_parent_by_email, get_parent_by_username};
use crate::backend::auth::handlers::types::{AccountResponse, AuthResponse, LoginRequest};
use crate::backend::auth::password::verify_password;
use crate::backend::auth::sessions::{create_token, Role};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::ProducerId;

/// Parent login handler
///
/// `username` may hold the parent's email.
///
/// # Errors
///
/// * `401 Unauthorized` - parent not found or password incorrect
/// * `503 Service Unavailable` - database is not configured
/// * `500 Internal Server Error` - database query or token generation failed
pub async fn parent_login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let pool = app_state.db_pool.as_ref().ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::DatabaseUnavailable
    })?;
    tracing::info!("Parent login request for: {}", request.username);

    let parent = if request.username.contains('@') {
        get_parent_by_email(pool, &request.username).await?
    } else {
        get_parent_by_username(pool, &request.username).await?
    };

    let parent = parent.ok_or_else(|| {
        tracing::warn!("Parent not found: {}", request.username);
        BackendError::unauthorized("Invalid credentials")
    })?;

    check_password(request.password, parent.password_hash.clone(), &request.username).await?;

    let token = issue_token(&app_state, parent.id, Role::Parent, ProducerId::from(parent.id))?;

    tracing::info!("Parent logged in successfully: {} ({})", parent.username, parent.email);

    Ok(Json(AuthResponse {
        token,
        account: AccountResponse::from(&parent),
    }))
}

/// Child login handler
///
/// The issued token's producer identity is the linked parent's id, so the
/// child's reports reach viewers subscribed to that parent.
///
/// # Errors
///
/// * `401 Unauthorized` - child not found or password incorrect
/// * `503 Service Unavailable` - database is not configured
pub async fn child_login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let pool = app_state.db_pool.as_ref().ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::DatabaseUnavailable
    })?;
    tracing::info!("Child login request for: {}", request.username);

    let child = get_child_by_username(pool, &request.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Child not found: {}", request.username);
            BackendError::unauthorized("Invalid credentials")
        })?;

    check_password(request.password, child.password_hash.clone(), &request.username).await?;

    let token = issue_token(&app_state, child.id, Role::Child, ProducerId::from(child.parent_id))?;

    tracing::info!("Child logged in successfully: {} (parent {})", child.username, child.parent_id);

    Ok(Json(AuthResponse {
        token,
        account: AccountResponse::from(&child),
    }))
}

async fn check_password(password: String, password_hash: String, username: &str) -> Result<(), BackendError> {
    let valid = verify_password(password, password_hash).await.map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        BackendError::internal("password verification failed")
    })?;

    if !valid {
        tracing::warn!("Invalid password for: {}", username);
        return Err(BackendError::unauthorized("Invalid credentials"));
    }

    Ok(())
}

fn issue_token(
    app_state: &AppState,
    account_id: Uuid,
    role: Role,
    producer: ProducerId,
) -> Result<String, BackendError> {
    create_token(&app_state.config.jwt_secret, account_id, role, &producer).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("token generation failed")
    })
}
