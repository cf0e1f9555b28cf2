//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use altitudes::models::{CatalogItem, SignerConfig};
use altitudes::server::{build_router, AppState};
use altitudes::services::{Catalog, InMemoryCatalog, ManualClock, SignedUrlService};

use super::fixtures::{CDN_BASE_URL, NOW, SECRET};

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub signer: Arc<SignedUrlService>,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Create a test application with an empty catalog
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(InMemoryCatalog::default()))
    }

    /// Create a test application serving the given items
    pub fn with_items(items: Vec<CatalogItem>) -> Self {
        Self::with_catalog(Arc::new(InMemoryCatalog::new(items)))
    }

    /// Create a test application with a custom catalog source
    pub fn with_catalog(catalog: Arc<dyn Catalog>) -> Self {
        let config = SignerConfig::with_defaults(SECRET, CDN_BASE_URL)
            .expect("Failed to create signer config");
        let clock = Arc::new(ManualClock::new(NOW));
        let signer = SignedUrlService::with_clock(config, clock.clone());

        let state = AppState::new(signer, catalog);
        let signer = state.signer.clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self {
            router,
            signer,
            clock,
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Request a signed URL and return the parsed response
    pub async fn sign(&self, body: serde_json::Value) -> TestResponse {
        self.post_json("/api/sign-url", &body.to_string()).await
    }

    /// Send a request to the router
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// The `signedUrl` field of a sign-url response
    pub fn signed_url(&self) -> String {
        let json: serde_json::Value = self.json();
        json["signedUrl"]
            .as_str()
            .unwrap_or_else(|| panic!("Expected signedUrl in {}", self.text()))
            .to_string()
    }
}
