//! A mock ticketing API.

use serde_json::json;
use std::time::Duration;
use ticketing_sdk_core::{ApiContext, ClientSettings, Environment, SharedContext};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// User name accepted by [`MockApi::mock_login`].
pub const TEST_USER: &str = "test-user";
/// Password accepted by [`MockApi::mock_login`].
pub const TEST_PASSWORD: &str = "test-password";
/// Token issued by [`MockApi::mock_login`].
pub const TEST_TOKEN: &str = "test-token";

/// A `wiremock` server standing in for every service host.
///
/// Contexts built here carry a base-URL override, so every service sends
/// its requests to this one server.
pub struct MockApi {
    server: MockServer,
}

impl std::fmt::Debug for MockApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockApi").field("uri", &self.uri()).finish()
    }
}

impl MockApi {
    /// Start a server on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// The underlying server, for mounting mocks.
    #[must_use]
    pub const fn server(&self) -> &MockServer {
        &self.server
    }

    /// Base URI of the server.
    #[must_use]
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Anonymous context pointed at this server.
    #[must_use]
    pub fn context(&self) -> ApiContext {
        ApiContext::new(Environment::Qa).with_base_url(self.uri())
    }

    /// Context with [`TEST_USER`] credentials, not yet logged in.
    #[must_use]
    pub fn jwt_context(&self) -> ApiContext {
        self.context().with_credentials(TEST_USER, TEST_PASSWORD)
    }

    /// Context already holding [`TEST_TOKEN`].
    #[must_use]
    pub fn token_context(&self) -> ApiContext {
        self.jwt_context().with_access_token(TEST_TOKEN)
    }

    /// [`MockApi::context`], shared.
    #[must_use]
    pub fn shared_context(&self) -> SharedContext {
        self.context().into_shared()
    }

    /// Settings with a short timeout and cache TTL.
    #[must_use]
    pub fn settings(&self) -> ClientSettings {
        ClientSettings::default()
            .with_timeout(Duration::from_secs(5))
            .with_cache_ttl(Duration::from_secs(60))
    }

    /// Accept `POST /login` with [`TEST_USER`] and issue [`TEST_TOKEN`],
    /// exactly `times` times.
    pub async fn mock_login(&self, times: u64) {
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(json!({"username": TEST_USER, "password": TEST_PASSWORD})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": TEST_TOKEN})))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server received for `request_path`.
    pub async fn hits(&self, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == request_path)
            .count()
    }
}
