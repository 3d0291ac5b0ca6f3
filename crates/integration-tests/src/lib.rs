//! Integration test harness for the Merchify dashboard.
//!
//! Tests drive the real router in-process with `tower::ServiceExt::oneshot`;
//! no socket is bound and state lives in a memory-backed key-value store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p merchify-integration-tests
//! ```

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use merchify_dashboard::config::DashboardConfig;
use merchify_dashboard::persistence::SharedStore;
use merchify_dashboard::seed;
use merchify_dashboard::state::AppState;

/// Largest response body a test will read.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// A seeded application plus handles for inspecting it.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub kv: SharedStore,
}

impl TestApp {
    /// Seeded app over an empty memory store.
    ///
    /// # Panics
    ///
    /// Panics if the state cannot be built.
    #[must_use]
    pub fn new() -> Self {
        Self::with_kv(SharedStore::memory())
    }

    /// Seeded app over an existing key-value store, as after a restart.
    ///
    /// # Panics
    ///
    /// Panics if the state cannot be built.
    #[must_use]
    pub fn with_kv(kv: SharedStore) -> Self {
        let now = std::time::SystemTime::now().into();
        let state = AppState::with_store(DashboardConfig::default(), kv.clone(), seed::store(now))
            .expect("state");
        Self {
            router: merchify_dashboard::app(state.clone()),
            state,
            kv,
        }
    }

    /// Send one request and decode the JSON response body.
    ///
    /// Empty bodies decode to `Value::Null`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body is not JSON.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
