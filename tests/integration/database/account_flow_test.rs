//! Account flow against PostgreSQL
//!
//! Parent signs up, adds a child, the child logs in and reports, the parent
//! reads the history.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use safetrack::backend::auth::handlers::{AccountResponse, AuthResponse};
use safetrack::backend::auth::sessions::Role;
use safetrack::backend::location::store::PgLocationStore;
use safetrack::backend::routes::create_router;
use safetrack::backend::server::config::ServerConfig;
use safetrack::backend::server::state::AppState;
use safetrack::shared::LocationPayload;
use serde_json::json;

use crate::common::{test_pool, unique_username};

#[tokio::test]
async fn test_parent_child_location_flow() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let state = AppState::new(
        ServerConfig::default(),
        Some(pool.clone()),
        Arc::new(PgLocationStore::new(pool)),
    );
    let server = TestServer::new(create_router(state)).unwrap();

    let parent_name = unique_username("parent");
    let response = server
        .post("/api/parents/signup")
        .json(&json!({
            "username": parent_name,
            "email": format!("{}@example.com", parent_name),
            "password": "password123"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let parent: AuthResponse = response.json();
    assert_eq!(parent.account.role, Role::Parent);

    let duplicate = server
        .post("/api/parents/signup")
        .json(&json!({
            "username": parent_name,
            "email": "other@example.com",
            "password": "password123"
        }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let child_name = unique_username("child");
    let response = server
        .post("/api/children")
        .authorization_bearer(&parent.token)
        .json(&json!({ "username": child_name, "display_name": "Sam", "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let child_account: AccountResponse = response.json();
    assert_eq!(child_account.producer_identity, parent.account.id);

    let response = server.get("/api/children").authorization_bearer(&parent.token).await;
    let children: Vec<AccountResponse> = response.json();
    assert_eq!(children, vec![child_account.clone()]);

    let wrong = server
        .post("/api/children/login")
        .json(&json!({ "username": child_name, "password": "wrong-password" }))
        .await;
    assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/children/login")
        .json(&json!({ "username": child_name, "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let child: AuthResponse = response.json();

    let response = server
        .post("/api/location")
        .authorization_bearer(&child.token)
        .json(&json!({ "latitude": 10.0, "longitude": 20.0, "timestamp": 1000 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .post("/api/parents/login")
        .json(&json!({ "username": format!("{}@example.com", parent_name), "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let parent: AuthResponse = response.json();

    let response = server.get("/api/locations").authorization_bearer(&parent.token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let history: Vec<LocationPayload> = response.json();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].entity_identity.as_str(), child_account.id);
    assert_eq!(history[0].producer_identity.as_str(), parent.account.id);
}
