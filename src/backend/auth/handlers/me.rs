/**
 * Get Current Account Handler
 *
 * GET /api/me returns the session the caller's token describes. It is
 * answered from the verified claims alone, so it works without a database.
 */

use axum::response::Json;

use crate::backend::auth::handlers::types::MeResponse;
use crate::backend::middleware::auth::AuthUser;

/// Get current account handler
///
/// # Example Response
///
/// ```json
/// {
///   "id": "123e4567-e89b-12d3-a456-426614174000",
///   "role": "child",
///   "producer_identity": "9b2e0c1a-4d5f-4c3b-8a7e-1f2d3c4b5a69"
/// }
/// ```
pub async fn get_me(AuthUser(user): AuthUser) -> Json<MeResponse> {
    tracing::debug!(account_id = %user.account_id, "Session lookup");

    Json(MeResponse {
        id: user.account_id.to_string(),
        role: user.role,
        producer_identity: user.producer.to_string(),
    })
}
