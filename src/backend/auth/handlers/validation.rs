/**
 * Account Input Validation
 *
 * Rules shared by parent signup and child creation.
 */

use axum::http::StatusCode;

use crate::backend::error::BackendError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check username and password, returning a 400 error on the first failure
pub fn validate_credentials(username: &str, password: &str) -> Result<(), BackendError> {
    if !is_valid_username(username) {
        tracing::warn!("Invalid username format: {}", username);
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    if password.len() < MIN_PASSWORD_LEN {
        tracing::warn!("Password too short");
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            "Password must be at least 8 characters",
        ));
    }

    Ok(())
}
