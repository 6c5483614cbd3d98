/**
 * Child Account Handlers
 *
 * POST /api/children and GET /api/children. Both require a parent session;
 * children are always created under, and listed for, the calling parent.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::accounts::{create_child, get_child_by_username, list_children};
use crate::backend::auth::handlers::types::{AccountResponse, CreateChildRequest};
use crate::backend::auth::handlers::validation::validate_credentials;
use crate::backend::auth::password::hash_password;
use crate::backend::auth::sessions::Role;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// Create a child account linked to the calling parent
///
/// # Errors
///
/// * `400 Bad Request` - invalid username or password
/// * `403 Forbidden` - caller is not a parent
/// * `409 Conflict` - child username already taken
/// * `503 Service Unavailable` - database is not configured
pub async fn create_child_account(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateChildRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), BackendError> {
    user.require(Role::Parent)?;

    let pool = app_state.db_pool.as_ref().ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::DatabaseUnavailable
    })?;
    tracing::info!(parent_id = %user.account_id, "Create child request for username: {}", request.username);

    validate_credentials(&request.username, &request.password)?;

    if get_child_by_username(pool, &request.username).await?.is_some() {
        tracing::warn!("Child username already exists: {}", request.username);
        return Err(BackendError::handler(StatusCode::CONFLICT, "Username already taken"));
    }

    let display_name = match request.display_name.trim() {
        "" => request.username.clone(),
        name => name.to_string(),
    };

    let password_hash = hash_password(request.password).await.map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::internal("password hashing failed")
    })?;

    let child = create_child(pool, user.account_id, request.username, display_name, password_hash)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create child: {:?}", e);
            BackendError::from(e)
        })?;

    tracing::info!(parent_id = %user.account_id, child_id = %child.id, "Child created successfully");

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&child))))
}

/// List the calling parent's children
pub async fn list_child_accounts(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<AccountResponse>>, BackendError> {
    user.require(Role::Parent)?;

    let pool = app_state.db_pool.as_ref().ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::DatabaseUnavailable
    })?;

    let children = list_children(pool, user.account_id).await?;
    tracing::debug!(parent_id = %user.account_id, "Listed {} children", children.len());

    Ok(Json(children.iter().map(AccountResponse::from).collect()))
}
