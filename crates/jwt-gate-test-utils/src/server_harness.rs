//! Test server harness for E2E testing
//!
//! Provides TestServer for spawning real jwt-gate server instances in tests.

use crate::fixtures::test_signing_config;
use jwt_gate::config::SigningConfig;
use jwt_gate::crypto::TokenCodec;
use jwt_gate::repositories::users::mock::MockIdentityStore;
use jwt_gate::repositories::User;
use jwt_gate::routes::{self, init_metrics_recorder, AppState};
use jwt_gate::services::TokenValidator;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use tokio::task::JoinHandle;

/// Global metrics handle shared by every test server in the process.
static TEST_METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn test_metrics_handle() -> PrometheusHandle {
    TEST_METRICS_HANDLE
        .get_or_init(|| {
            // Fall back to a standalone recorder if one is already installed
            init_metrics_recorder()
                .unwrap_or_else(|_| PrometheusBuilder::new().build_recorder().handle())
        })
        .clone()
}

/// Test harness for spawning jwt-gate in E2E tests
///
/// Backed by an in-memory [`MockIdentityStore`], so no database is needed.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_me() -> Result<()> {
///     let server = TestServer::spawn([test_user(42)]).await?;
///     let token = server.issue_token(42)?;
///
///     let response = reqwest::Client::new()
///         .get(format!("{}/api/v1/me", server.url()))
///         .bearer_auth(&token)
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestServer {
    addr: SocketAddr,
    store: Arc<MockIdentityStore>,
    codec: TokenCodec,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Spawn a server with the default test signing configuration.
    pub async fn spawn(users: impl IntoIterator<Item = User>) -> Result<Self, anyhow::Error> {
        Self::spawn_with_config(users, test_signing_config()).await
    }

    /// Spawn a server with a custom signing configuration.
    ///
    /// The server binds to a random available port (127.0.0.1:0) and runs in
    /// the background until the `TestServer` is dropped with the runtime.
    pub async fn spawn_with_config(
        users: impl IntoIterator<Item = User>,
        signing: SigningConfig,
    ) -> Result<Self, anyhow::Error> {
        let store = Arc::new(MockIdentityStore::with_users(users));
        let codec = TokenCodec::new(&signing);

        let validator = Arc::new(TokenValidator::new(codec.clone(), store.clone()));
        let state = Arc::new(AppState { validator });

        // Build routes using jwt-gate's real route builder
        let app = routes::build_routes(state, test_metrics_handle());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            store,
            codec,
            _handle: handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The server's identity store, for seeding users and counting lookups.
    pub fn store(&self) -> &MockIdentityStore {
        &self.store
    }

    /// The server's codec, for issuing tokens the server will accept.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Issue a token for user `id` with the server's own codec.
    pub fn issue_token(&self, id: i64) -> Result<String, anyhow::Error> {
        self.codec
            .issue(&common::types::UserId(id))
            .map_err(|e| anyhow::anyhow!("Failed to issue test token: {}", e))
    }
}
