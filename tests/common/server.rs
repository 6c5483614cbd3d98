//! Test application builders
//!
//! Builds the real router around an in-memory location store and no
//! database, either behind `axum_test::TestServer` or on a real TCP port for
//! WebSocket clients.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use safetrack::backend::location::store::MemoryLocationStore;
use safetrack::backend::routes::create_router;
use safetrack::backend::server::config::ServerConfig;
use safetrack::backend::server::state::AppState;
use safetrack::shared::ProducerId;

/// Application state plus a handle on its in-memory store
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryLocationStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(ServerConfig {
            jwt_secret: "integration-test-secret".to_string(),
            ..ServerConfig::default()
        })
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let store = Arc::new(MemoryLocationStore::new());
        let state = AppState::new(config, None, store.clone());
        Self { state, store }
    }

    /// Router-level test server sharing this app's state
    pub fn server(&self) -> TestServer {
        TestServer::new(create_router(self.state.clone())).expect("Failed to build test server")
    }

    /// Serve the router on an ephemeral local port
    pub async fn spawn(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let router = create_router(self.state.clone());

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Test server failed");
        });

        addr
    }

    /// Wait until `count` live connections subscribe to `producer`
    pub async fn wait_for_subscribers(&self, producer: &str, count: usize) {
        let producer = ProducerId::from(producer);
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);

        while self.state.registry.connections_for(&producer).await.len() != count {
            if tokio::time::Instant::now() > deadline {
                panic!("Timed out waiting for {} subscribers of {}", count, producer);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Wait until the registry holds exactly `count` connections
    pub async fn wait_for_connections(&self, count: usize) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);

        while self.state.registry.len().await != count {
            if tokio::time::Instant::now() > deadline {
                panic!("Timed out waiting for {} connections", count);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
