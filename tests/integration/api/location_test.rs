//! Location API integration tests
//!
//! Reports go in over HTTP and come out of registered viewer handles.

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use safetrack::backend::location::Ack;
use safetrack::backend::realtime::ConnectionHandle;
use safetrack::backend::routes::HealthResponse;
use safetrack::shared::{LocationPayload, ProducerId};
use serde_json::json;

use crate::common::{child_session, forged_token, parent_session, TestApp};

fn location(latitude: f64, longitude: f64, timestamp: i64) -> serde_json::Value {
    json!({ "latitude": latitude, "longitude": longitude, "timestamp": timestamp })
}

#[tokio::test]
async fn test_post_location_delivers_to_subscriber() {
    let app = TestApp::new();
    let server = app.server();
    let child = child_session(&app.state, "parent:42");

    let (handle, mut rx) = ConnectionHandle::channel(8);
    let viewer = handle.id();
    app.state.registry.register(handle).await;
    app.state
        .registry
        .set_subscription(viewer, ProducerId::from("parent:42"))
        .await
        .unwrap();

    let response = server
        .post("/api/location")
        .authorization_bearer(&child.token)
        .json(&location(10.0, 20.0, 1000))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let ack: Ack = response.json();
    assert_eq!(ack.message, "Location received");
    assert_eq!(ack.delivered, 1);
    crate::assert_approx_eq!(ack.latitude, 10.0, f64::EPSILON);

    let payload = rx.try_recv().expect("viewer should have a payload queued");
    assert_eq!(payload.producer_identity.as_str(), "parent:42");
    assert_eq!(payload.entity_identity.as_str(), child.account_id.to_string());
    assert_eq!(payload.timestamp, 1000);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_update_location_alias() {
    let app = TestApp::new();
    let server = app.server();
    let child = child_session(&app.state, "parent:42");

    let response = server
        .post("/updateLocation")
        .authorization_bearer(&child.token)
        .json(&location(51.5, -0.12, 1700000000))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Location received");
    assert_eq!(body["timestamp"], 1700000000);
    assert_eq!(body["delivered"], 0);
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_post_location_without_token() {
    let app = TestApp::new();
    let server = app.server();

    let response = server.post("/api/location").json(&location(10.0, 20.0, 1000)).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    crate::assert_error_body!(body, StatusCode::UNAUTHORIZED);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_post_location_with_forged_token() {
    let app = TestApp::new();
    let server = app.server();

    let response = server
        .post("/api/location")
        .authorization_bearer(forged_token())
        .json(&location(10.0, 20.0, 1000))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_parent_cannot_post_location() {
    let app = TestApp::new();
    let server = app.server();
    let parent = parent_session(&app.state, "parent:42");

    let response = server
        .post("/api/location")
        .authorization_bearer(&parent.token)
        .json(&location(10.0, 20.0, 1000))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_storage_failure_returns_500_and_dispatches_nothing() {
    let app = TestApp::new();
    let server = app.server();
    let child = child_session(&app.state, "parent:42");

    let (handle, mut rx) = ConnectionHandle::channel(8);
    let viewer = handle.id();
    app.state.registry.register(handle).await;
    app.state
        .registry
        .set_subscription(viewer, ProducerId::from("parent:42"))
        .await
        .unwrap();

    app.store.set_fail_writes(true);

    let response = server
        .post("/api/location")
        .authorization_bearer(&child.token)
        .json(&location(10.0, 20.0, 1000))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    crate::assert_error_body!(body, StatusCode::INTERNAL_SERVER_ERROR);

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_duplicate_report_is_rejected() {
    let app = TestApp::new();
    let server = app.server();
    let child = child_session(&app.state, "parent:42");

    let first = server
        .post("/api/location")
        .authorization_bearer(&child.token)
        .json(&location(10.0, 20.0, 1000))
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);

    let second = server
        .post("/api/location")
        .authorization_bearer(&child.token)
        .json(&location(11.0, 21.0, 1000))
        .await;
    assert_eq!(second.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_location_history_for_parent() {
    let app = TestApp::new();
    let server = app.server();
    let first_child = child_session(&app.state, "parent:42");
    let second_child = child_session(&app.state, "parent:42");
    let stranger = child_session(&app.state, "parent:99");
    let parent = parent_session(&app.state, "parent:42");

    for (child, timestamp) in [(&first_child, 3000), (&second_child, 1000), (&stranger, 2000), (&first_child, 2000)] {
        let response = server
            .post("/api/location")
            .authorization_bearer(&child.token)
            .json(&location(10.0, 20.0, timestamp))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let response = server
        .get("/api/locations")
        .authorization_bearer(&parent.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let history: Vec<LocationPayload> = response.json();
    let timestamps: Vec<i64> = history.iter().map(|p| p.timestamp).collect();
    assert_eq!(timestamps, vec![1000, 2000, 3000]);
    assert!(history.iter().all(|p| p.producer_identity.as_str() == "parent:42"));
}

#[tokio::test]
async fn test_child_cannot_read_history() {
    let app = TestApp::new();
    let server = app.server();
    let child = child_session(&app.state, "parent:42");

    let response = server
        .get("/api/locations")
        .authorization_bearer(&child.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_health_reports_live_connections() {
    let app = TestApp::new();
    let server = app.server();

    let (handle, _rx) = ConnectionHandle::channel(8);
    app.state.registry.register(handle).await;

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let health: HealthResponse = response.json();
    assert_eq!(
        health,
        HealthResponse {
            status: "ok".to_string(),
            connections: 1,
        }
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new();
    let server = app.server();

    let response = server.get("/nowhere").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    crate::assert_error_body!(body, StatusCode::NOT_FOUND);
}
