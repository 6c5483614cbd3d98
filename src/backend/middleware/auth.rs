/**
 * Authentication Middleware
 *
 * This module protects routes that require a session. It extracts and
 * verifies the JWT from the Authorization header and hands the account id,
 * role and producer identity to handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::accounts::{get_child_by_id, get_parent_by_id};
use crate::backend::auth::sessions::{verify_token, Role};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::ProducerId;

/// Authenticated account extracted from the JWT
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticatedUser {
    pub account_id: Uuid,
    pub role: Role,
    pub producer: ProducerId,
}

impl AuthenticatedUser {
    /// Reject the request with 403 unless the account has `role`
    pub fn require(&self, role: Role) -> Result<(), BackendError> {
        if self.role == role {
            Ok(())
        } else {
            tracing::warn!(
                account_id = %self.account_id,
                "Account with role {} tried a {} route",
                self.role,
                role
            );
            Err(BackendError::forbidden(format!("Requires a {} account", role)))
        }
    }
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT from the Authorization header
/// 2. Verifies it with the configured secret
/// 3. Checks the account still exists when a database is configured
/// 4. Attaches `AuthenticatedUser` to the request extensions
///
/// Returns 401 Unauthorized if the token is missing or invalid
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized("Missing Authorization header")
        })?;

    // Format: "Bearer <token>"
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::unauthorized("Invalid Authorization header")
    })?;

    let user = authenticate(&app_state, token).await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Verify a session token and resolve the account it names
///
/// Shared by `auth_middleware` and the viewer WebSocket upgrade, which
/// cannot always send an Authorization header.
pub async fn authenticate(app_state: &AppState, token: &str) -> Result<AuthenticatedUser, BackendError> {
    let claims = verify_token(&app_state.config.jwt_secret, token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Invalid token")
    })?;

    let account_id = claims.account_id().map_err(|e| {
        tracing::warn!("Invalid account ID in token: {:?}", e);
        BackendError::unauthorized("Invalid token")
    })?;

    if let Some(pool) = &app_state.db_pool {
        if !account_exists(pool, account_id, claims.role).await? {
            tracing::warn!(account_id = %account_id, "Account not found in database");
            return Err(BackendError::unauthorized("Account not found"));
        }
    }

    Ok(AuthenticatedUser {
        account_id,
        role: claims.role,
        producer: claims.producer_id(),
    })
}

async fn account_exists(pool: &PgPool, account_id: Uuid, role: Role) -> Result<bool, sqlx::Error> {
    let exists = match role {
        Role::Parent => get_parent_by_id(pool, account_id).await?.is_some(),
        Role::Child => get_child_by_id(pool, account_id).await?.is_some(),
    };
    Ok(exists)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Not authenticated")
            })?;

        Ok(AuthUser(user))
    }
}
