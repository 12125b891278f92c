//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (catalog store reachable)
//!
//! # Product intelligence
//! GET  /api/admin/product-intel         - Products with margins and suggestions
//! GET  /api/admin/product-intel/{id}    - Full cost, nutrition and profit breakdown
//! PUT  /api/admin/product-intel/{id}    - Override a product's unit costs
//! ```

pub mod product_intel;

use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/api/admin/product-intel", get(product_intel::list))
        .route(
            "/api/admin/product-intel/{id}",
            get(product_intel::detail).put(product_intel::update_cost),
        )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the catalog store cannot be read.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
