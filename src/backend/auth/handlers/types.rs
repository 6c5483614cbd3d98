/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the account
 * handlers: parent signup and login, child creation and login, and the
 * current-session summary.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::accounts::{Child, Parent};
use crate::backend::auth::sessions::Role;

/// Parent sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct ParentSignupRequest {
    /// Chosen username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    pub email: String,
    /// Password (will be hashed before storage)
    pub password: String,
}

/// Login request, shared by parents and children
///
/// Parents may put their email in `username`.
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request of a parent adding a child account
#[derive(Deserialize, Serialize, Debug)]
pub struct CreateChildRequest {
    pub username: String,
    /// Name shown to the parent; defaults to the username when empty
    #[serde(default)]
    pub display_name: String,
    pub password: String,
}

/// Account information safe to return to clients
///
/// Never includes the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AccountResponse {
    /// Account ID (UUID)
    pub id: String,
    pub username: String,
    pub role: Role,
    /// Producer identity the account reports to or watches
    pub producer_identity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl From<&Parent> for AccountResponse {
    fn from(parent: &Parent) -> Self {
        Self {
            id: parent.id.to_string(),
            username: parent.username.clone(),
            role: Role::Parent,
            producer_identity: parent.id.to_string(),
            email: Some(parent.email.clone()),
            display_name: None,
        }
    }
}

impl From<&Child> for AccountResponse {
    fn from(child: &Child) -> Self {
        Self {
            id: child.id.to_string(),
            username: child.username.clone(),
            role: Role::Child,
            producer_identity: child.parent_id.to_string(),
            email: None,
            display_name: Some(child.display_name.clone()),
        }
    }
}

/// Auth response
///
/// Returned by signup and login handlers. Contains the JWT token and the
/// account for immediate use.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// JWT token (30-day expiration)
    pub token: String,
    pub account: AccountResponse,
}

/// Summary of the caller's session, read from the token
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MeResponse {
    pub id: String,
    pub role: Role,
    pub producer_identity: String,
}
