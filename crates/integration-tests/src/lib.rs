//! Integration tests for the Drizzl admin API.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process router tests (no database or server needed)
//! cargo test -p drizzl-integration-tests
//!
//! # Live-server smoke test against a running admin server
//! ADMIN_BASE_URL=http://localhost:3001 cargo test -p drizzl-integration-tests -- --ignored
//! ```
//!
//! Router tests drive [`drizzl_admin::app`] through `tower::ServiceExt::oneshot`
//! over a [`MemoryCatalogStore`], which can be told to fail reads, fail writes,
//! or report cost overrides as unsupported.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use drizzl_admin::db::MemoryCatalogStore;
use drizzl_admin::intel::MarginEngine;
use drizzl_admin::models::Product;
use drizzl_admin::state::AppState;
use drizzl_core::{Cents, ProductId};

/// An in-process admin app over a shared memory store.
pub struct TestApp {
    /// The backing store; toggle its failure flags between requests.
    pub store: Arc<MemoryCatalogStore>,
    router: Router,
}

impl TestApp {
    /// Build the app over `store` with the default engine settings.
    #[must_use]
    pub fn new(store: MemoryCatalogStore) -> Self {
        let store = Arc::new(store);
        let state = AppState::new(store.clone(), MarginEngine::default());
        Self {
            store,
            router: drizzl_admin::app(state),
        }
    }

    /// App over an empty catalog (every view falls back to demo data).
    #[must_use]
    pub fn empty() -> Self {
        Self::new(MemoryCatalogStore::new())
    }

    /// Send a GET request, returning the status and the JSON body (`Null` if not JSON).
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Send a PUT request with a JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn put_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

/// A catalog product fixture.
#[must_use]
pub fn product(id: &str, name: &str, category: Option<&str>, price_cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: None,
        category: category.map(str::to_string),
        price_cents: Cents::new(price_cents),
        wholesale_price_cents: Cents::new(price_cents * 6 / 10),
        is_active: true,
    }
}

/// Read a JSON number as `f64` (decimals serialize as floats).
#[must_use]
pub fn number(value: &Value) -> f64 {
    value.as_f64().unwrap_or(f64::NAN)
}

/// Assert two JSON-decoded amounts agree to within float noise.
///
/// # Panics
///
/// Panics if the values differ by more than `1e-9`.
pub fn assert_amount(value: &Value, expected: f64) {
    let actual = number(value);
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
