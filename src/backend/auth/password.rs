/**
 * Password Hashing
 *
 * bcrypt is CPU bound, so hashing and verification run on tokio's blocking
 * pool and the request task only awaits the result.
 */

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// Hash a password with bcrypt's default cost
pub async fn hash_password(password: String) -> Result<String, BcryptError> {
    hash_password_with_cost(password, DEFAULT_COST).await
}

/// Hash a password with an explicit cost
pub async fn hash_password_with_cost(password: String, cost: u32) -> Result<String, BcryptError> {
    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Password hashing task failed: {:?}", e);
            Err(BcryptError::InvalidHash("hashing task failed".to_string()))
        })
}

/// Check a password against a stored bcrypt hash
pub async fn verify_password(password: String, password_hash: String) -> Result<bool, BcryptError> {
    tokio::task::spawn_blocking(move || verify(password, &password_hash))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Password verification task failed: {:?}", e);
            Err(BcryptError::InvalidHash("verification task failed".to_string()))
        })
}
