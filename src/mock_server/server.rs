//! Mock Halon API server.
//!
//! Provides an axum-based HTTP server that simulates the appliance's
//! management API under `/api/{version}`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::Response,
    routing::get,
    Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{Fixtures, MOCK_PASSWORD, MOCK_USER};
use super::handlers::{self, MockRequest};
use super::state::MockState;
use crate::{ClientConfig, HalonClient, TlsMode};

/// A mock Halon appliance for testing.
///
/// The server runs in the background on a random local port.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    pub async fn start() -> Self {
        Self::with_state(Fixtures::default_state()).await
    }

    /// Start a mock server with empty state and no credential check.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server (without the API prefix).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Settings for a client talking to this server with the default
    /// fixture credentials.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.url.clone(), MOCK_USER, MOCK_PASSWORD).tls(TlsMode::Plain)
    }

    /// A client talking to this server with the default fixture credentials.
    pub fn client(&self) -> HalonClient {
        HalonClient::new(self.client_config()).expect("mock server URL is valid")
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the axum router.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            .route("/health", get(health_check))
            .fallback(dispatch)
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

/// Authenticate, strip `/api/{version}`, decode, and hand off to the
/// handler table.
async fn dispatch(
    State(state): State<Arc<RwLock<MockState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.write().await;

    if let Some((user, password)) = &state.credentials {
        if !authorized(&headers, user, password) {
            return handlers::error(StatusCode::UNAUTHORIZED, "Unauthorized");
        }
    }

    let mut segments = uri.path().trim_start_matches('/').split('/');
    if segments.next() != Some("api") || segments.next().is_none() {
        return handlers::error(StatusCode::NOT_FOUND, "Not found");
    }
    let segments: Vec<String> = segments
        .map(|s| {
            urlencoding::decode(s)
                .map(|d| d.into_owned())
                .unwrap_or_else(|_| s.to_string())
        })
        .collect();

    let query: HashMap<String, String> = uri
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    let body = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => Some(value),
            Err(_) => return handlers::error(StatusCode::BAD_REQUEST, "Body is not JSON"),
        }
    };

    let request = MockRequest {
        method,
        segments,
        query,
        body,
    };
    handlers::route(&mut state, &request)
}

fn authorized(headers: &HeaderMap, user: &str, password: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
        .and_then(|encoded| STANDARD.decode(encoded).ok())
        .and_then(|decoded| String::from_utf8(decoded).ok())
        .is_some_and(|pair| pair == format!("{user}:{password}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_rejects_wrong_credentials() {
        let server = MockServer::start().await;
        let config = ClientConfig::new(server.url(), "admin", "wrong").tls(TlsMode::Plain);
        let client = HalonClient::new(config).unwrap();

        let err = client.get_system_uptime().await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "Unauthorized");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_uptime_with_default_fixtures() {
        let server = MockServer::start().await;
        let client = server.client();

        assert_eq!(client.get_system_uptime().await.unwrap(), 86_400);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_unknown_path_is_remote_error() {
        let server = MockServer::start_empty().await;
        let client = server.client();

        let err = client
            .execute(crate::RequestSpec::get("/nope"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Remote);
        assert_eq!(err.status(), Some(404));

        server.shutdown().await;
    }
}
