//! Coordination service fixtures at two realism levels.
//!
//! - [`MockCoordinationService`]: **MOCK**: a real HTTP server answering with
//!   scripted responses.
//! - [`unreachable_url`]: **OFFLINE**: an address nothing listens on.

use std::net::TcpListener;
use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Path of the status query endpoint.
pub const CHECK_STATUS_PATH: &str = "/api/check_status";

/// Path of the status update endpoint.
pub const POST_STATUS_PATH: &str = "/api/post_status";

/// A scripted stand-in for the coordination service.
///
/// # Example
///
/// ```rust,no_run
/// use relay_test_utils::{MockCoordinationService, payloads};
///
/// # async fn demo() {
/// let service = MockCoordinationService::start().await;
/// service.respond_json("/api/check_status", 200, payloads::check_status_ok()).await;
/// let url = service.uri();
/// # }
/// ```
pub struct MockCoordinationService {
    server: MockServer,
}

impl MockCoordinationService {
    /// Start a server on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to configure the client with.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Access the underlying server for custom expectations.
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Answer every `POST` to `endpoint` with `status` and a JSON body.
    pub async fn respond_json(&self, endpoint: &str, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer every `POST` to `endpoint` with `status` and a plain-text body.
    pub async fn respond_text(&self, endpoint: &str, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `POST`s to `endpoint` only after `delay`, to trigger client timeouts.
    pub async fn respond_slowly(&self, endpoint: &str, delay: Duration, body: Value) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far.
    ///
    /// # Panics
    /// Panics if request recording was disabled on the server.
    pub async fn received(&self) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .expect("MockCoordinationService: request recording is disabled")
    }
}

/// Return a local URL that refuses connections.
///
/// Binds an ephemeral port and releases it immediately, so a connection
/// attempt fails fast with "connection refused".
///
/// # Panics
/// Panics if no local port can be bound.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .unwrap_or_else(|e| panic!("unreachable_url: failed to bind: {e}"));
    let port = listener
        .local_addr()
        .unwrap_or_else(|e| panic!("unreachable_url: no local address: {e}"))
        .port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
