//! Authentication API integration tests
//!
//! Without a database, account routes answer 503 while token-only routes
//! keep working.

use axum::http::StatusCode;
use safetrack::backend::auth::handlers::MeResponse;
use safetrack::backend::auth::sessions::Role;
use serde_json::json;

use crate::common::{child_session, parent_session, TestApp};

#[tokio::test]
async fn test_get_me_from_token() {
    let app = TestApp::new();
    let server = app.server();
    let child = child_session(&app.state, "parent:42");

    let response = server.get("/api/me").authorization_bearer(&child.token).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let me: MeResponse = response.json();
    assert_eq!(me.id, child.account_id.to_string());
    assert_eq!(me.role, Role::Child);
    assert_eq!(me.producer_identity, "parent:42");
}

#[tokio::test]
async fn test_get_me_without_token() {
    let app = TestApp::new();
    let server = app.server();

    let response = server.get("/api/me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let app = TestApp::new();
    let server = app.server();

    let response = server
        .get("/api/me")
        .add_header(
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderValue::from_static("Token abc"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_without_database() {
    let app = TestApp::new();
    let server = app.server();

    let response = server
        .post("/api/parents/signup")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    crate::assert_error_body!(body, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_logins_without_database() {
    let app = TestApp::new();
    let server = app.server();
    let credentials = json!({ "username": "alice", "password": "password123" });

    let parent = server.post("/api/parents/login").json(&credentials).await;
    assert_eq!(parent.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let child = server.post("/api/children/login").json(&credentials).await;
    assert_eq!(child.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_children_routes_require_parent() {
    let app = TestApp::new();
    let server = app.server();
    let child = child_session(&app.state, "parent:42");
    let parent = parent_session(&app.state, "parent:42");

    let response = server.get("/api/children").authorization_bearer(&child.token).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server.get("/api/children").authorization_bearer(&parent.token).await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}
