/**
 * Signup Handler
 *
 * This module implements parent registration for POST /api/parents/signup.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Check that neither username nor email is taken
 * 3. Hash password using bcrypt
 * 4. Create the parent in the database
 * 5. Generate a JWT whose producer identity is the new parent's id
 * 6. Return token and account
 *
 * # Validation
 *
 * - Username: 3-30 chars, starts with a letter, alphanumeric + underscore
 * - Email must contain '@' character (basic validation)
 * - Password must be at least 8 characters long
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::accounts::{create_parent, get_parent_by_email, get_parent_by_username};
use crate::backend::auth::handlers::types::{AccountResponse, AuthResponse, ParentSignupRequest};
use crate::backend::auth::handlers::validation::validate_credentials;
use crate::backend::auth::password::hash_password;
use crate::backend::auth::sessions::{create_token, Role};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::ProducerId;

/// Parent sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - invalid username, email or password
/// * `409 Conflict` - username or email already registered
/// * `503 Service Unavailable` - database is not configured
/// * `500 Internal Server Error` - hashing, insert or token generation failed
///
/// # Example Request
///
/// ```http
/// POST /api/parents/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "securepassword123"
/// }
/// ```
pub async fn parent_signup(
    State(app_state): State<AppState>,
    Json(request): Json<ParentSignupRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let pool = app_state.db_pool.as_ref().ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::DatabaseUnavailable
    })?;
    tracing::info!("Signup request for username: {}, email: {}", request.username, request.email);

    validate_credentials(&request.username, &request.password)?;

    if !request.email.contains('@') {
        tracing::warn!("Invalid email format: {}", request.email);
        return Err(BackendError::handler(StatusCode::BAD_REQUEST, "Invalid email format"));
    }

    if get_parent_by_username(pool, &request.username).await?.is_some() {
        tracing::warn!("Username already exists: {}", request.username);
        return Err(BackendError::handler(StatusCode::CONFLICT, "Username already taken"));
    }

    if get_parent_by_email(pool, &request.email).await?.is_some() {
        tracing::warn!("Email already exists: {}", request.email);
        return Err(BackendError::handler(StatusCode::CONFLICT, "Email already registered"));
    }

    let password_hash = hash_password(request.password).await.map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::internal("password hashing failed")
    })?;

    let parent = create_parent(pool, request.username, request.email, password_hash)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create parent: {:?}", e);
            BackendError::from(e)
        })?;

    let token = create_token(
        &app_state.config.jwt_secret,
        parent.id,
        Role::Parent,
        &ProducerId::from(parent.id),
    )
    .map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("token generation failed")
    })?;

    tracing::info!("Parent created successfully: {} ({})", parent.username, parent.email);

    Ok(Json(AuthResponse {
        token,
        account: AccountResponse::from(&parent),
    }))
}
