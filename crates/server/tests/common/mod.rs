//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock places provider injected, so the HTTP surface can be tested
//! without network access.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use nearby_core::{
    config::{PlacesConfig, SearchConfig, ServerConfig},
    testing::MockProvider,
    Config, FanOut, KeywordStrategy, PlacesProvider,
};

/// Re-export fixtures for test convenience
pub use nearby_core::testing::fixtures;

/// Test fixture for E2E testing with a mock places provider.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_recommendations() {
///     let fixture = TestFixture::new().await;
///     fixture.provider.set_results(vec![fixtures::raw_place("a", 28.61, 77.21)]).await;
///
///     let response = fixture.post("/api/v1/recommendations", json!({
///         "lat": 28.61, "lng": 77.21
///     })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock provider - configure upstream results and failures
    pub provider: Arc<MockProvider>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    /// Body as text, for non-JSON endpoints.
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default settings.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let provider = Arc::new(MockProvider::new());

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            places: PlacesConfig::with_api_key("test-secret-key"),
            search: SearchConfig {
                sub_query_timeout_secs: 2,
                fan_out: test_config.fan_out,
                keyword_strategy: test_config.keyword_strategy,
            },
        };

        let state = Arc::new(nearby_server::state::AppState::new(
            config,
            Arc::clone(&provider) as Arc<dyn PlacesProvider>,
        ));

        let router = nearby_server::api::create_router(state);

        Self { router, provider }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    pub fan_out: FanOut,
    pub keyword_strategy: KeywordStrategy,
}

impl TestConfig {
    /// Create config that maps keywords to categories.
    pub fn with_categories() -> Self {
        Self {
            keyword_strategy: KeywordStrategy::Categories,
            ..Default::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
