/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/parents/signup` - Parent registration
 * - `POST /api/parents/login` - Parent login
 * - `POST /api/children/login` - Child login
 *
 * ## Protected (bearer token)
 * - `GET /api/me` - Current session
 * - `GET /api/children` - List the parent's children (parent)
 * - `POST /api/children` - Add a child (parent)
 * - `POST /api/location` - Report a location (child)
 * - `POST /updateLocation` - Same as `/api/location`
 * - `GET /api/locations` - Stored history of the parent's producer (parent)
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{
    child_login, create_child_account, get_me, list_child_accounts, parent_login, parent_signup,
};
use crate::backend::location::{get_locations, post_location};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Protected routes sit behind `auth_middleware`, which rejects requests
/// without a valid token before any handler runs. Role checks happen in the
/// handlers.
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/parents/signup", post(parent_signup))
        .route("/api/parents/login", post(parent_login))
        .route("/api/children/login", post(child_login));

    let protected = Router::new()
        .route("/api/me", get(get_me))
        .route("/api/children", get(list_child_accounts).post(create_child_account))
        .route("/api/location", post(post_location))
        .route("/updateLocation", post(post_location))
        .route("/api/locations", get(get_locations))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware));

    router.merge(public).merge(protected)
}
