//! Router-level tests for the product intelligence API.
//!
//! Every test drives the full router in-process over a memory catalog store.
//! The single live-server test is ignored by default; run it against a running
//! admin server with `cargo test -p drizzl-integration-tests -- --ignored`.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::{Value, json};

use drizzl_admin::db::MemoryCatalogStore;
use drizzl_integration_tests::{TestApp, assert_amount, product};

const LIST: &str = "/api/admin/product-intel";

fn names(body: &Value) -> Vec<String> {
    body["products"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|r| r["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn catalog() -> MemoryCatalogStore {
    MemoryCatalogStore::new().with_products([
        product("p-1", "Mango Sunrise", Some("smoothies"), 899),
        product("p-2", "Acai Classic", Some("bowls"), 1299),
    ])
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::empty();
    let (status, _) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_follows_store() {
    let app = TestApp::empty();
    let (status, _) = app.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);

    app.store.set_unreachable(true);
    let (status, _) = app.get("/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_empty_catalog_serves_demo_data() {
    let app = TestApp::empty();
    let (status, body) = app.get(LIST).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["demoMode"], true);
    assert_eq!(body["message"], "No products found - showing demo data");
    assert_eq!(body["products"].as_array().map(Vec::len), Some(8));
    assert_eq!(
        body["categories"],
        json!(["smoothies", "bowls", "high-protein", "bites", "wellness"])
    );
    assert!(!body["suggestions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_unreachable_store_serves_demo_data() {
    let app = TestApp::new(catalog());
    app.store.set_unreachable(true);

    let (status, body) = app.get(LIST).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["demoMode"], true);
    assert_eq!(body["message"], "Could not load products - showing demo data");
    assert_eq!(body["products"].as_array().map(Vec::len), Some(8));
}

#[tokio::test]
async fn test_list_real_catalog() {
    let app = TestApp::new(catalog());
    let (status, body) = app.get(&format!("{LIST}?sort=name")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["demoMode"], false);
    assert!(body.get("message").is_none());
    assert_eq!(names(&body), ["Acai Classic", "Mango Sunrise"]);

    let mango = &body["products"][1];
    assert_eq!(mango["id"], "p-1");
    assert_eq!(mango["price_cents"], 899);
    assert_amount(&mango["cost_per_unit"], 4.26);
    assert_amount(&mango["margin"], 4.74);
    assert_amount(&mango["margin_percent"], 52.7);
    assert_eq!(mango["margin_tier"], "healthy");
}

#[tokio::test]
async fn test_list_filters_do_not_change_suggestions() {
    let app = TestApp::empty();
    let (_, all) = app.get(LIST).await;
    let (_, bowls) = app.get(&format!("{LIST}?category=bowls")).await;

    assert_eq!(bowls["products"].as_array().map(Vec::len), Some(2));
    assert_eq!(bowls["suggestions"], all["suggestions"]);
    assert_eq!(bowls["categories"], all["categories"]);
}

#[tokio::test]
async fn test_list_search_and_sort() {
    let app = TestApp::empty();
    let (_, body) = app
        .get(&format!("{LIST}?search=protein&sort=name&direction=desc"))
        .await;
    assert_eq!(
        names(&body),
        ["Vanilla Protein Dream", "Chocolate Protein Shake"]
    );
}

// ============================================================================
// Detail
// ============================================================================

#[tokio::test]
async fn test_detail_demo_product() {
    let app = TestApp::new(catalog());
    let (status, body) = app.get(&format!("{LIST}/demo-1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["demoMode"], true);

    let product = &body["product"];
    assert_eq!(product["id"], "demo-1");
    assert_eq!(product["ingredients"].as_array().map(Vec::len), Some(5));
    assert_amount(&product["cost_breakdown"]["total"], 4.26);
    assert_amount(&product["cost_breakdown"]["ingredients"], 2.4);
    assert_amount(&product["nutrition_totals"]["calories"], 227.0);
    assert_amount(&product["profit_analysis"]["wholesale_margin"], 1.74);
    assert_amount(&product["profit_analysis"]["wholesale_margin_percent"], 29.0);
    assert_eq!(product["profit_analysis"]["break_even_units"], 1056);
}

#[tokio::test]
async fn test_detail_unknown_product_is_not_found() {
    let app = TestApp::new(catalog());
    let (status, body) = app.get(&format!("{LIST}/missing")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found: product missing");
}

#[tokio::test]
async fn test_detail_unreachable_store_is_server_error() {
    let app = TestApp::new(catalog());
    app.store.set_unreachable(true);

    let (status, body) = app.get(&format!("{LIST}/p-1")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");

    // Demo IDs never touch the store
    let (status, _) = app.get(&format!("{LIST}/demo-2")).await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Cost override
// ============================================================================

#[tokio::test]
async fn test_override_persists_and_feeds_views() {
    let app = TestApp::new(catalog());
    let (status, body) = app
        .put_json(
            &format!("{LIST}/p-1"),
            &json!({"cost_per_unit": 5.0, "ingredients_cost": 3.0, "packaging_cost": 1.0, "labor_cost": 1.0}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["demoMode"], false);
    assert_amount(&body["cost"]["margin_per_unit"], 3.99);

    let (_, list) = app.get(&format!("{LIST}?sort=name")).await;
    let mango = &list["products"][1];
    assert_amount(&mango["cost_per_unit"], 5.0);
    assert_amount(&mango["margin"], 3.99);
    assert_amount(&mango["margin_percent"], 44.4);
    assert_eq!(mango["margin_tier"], "fair");

    let (_, detail) = app.get(&format!("{LIST}/p-1")).await;
    assert_eq!(detail["demoMode"], false);
    assert_eq!(detail["product"]["profit_analysis"]["break_even_units"], 1254);
}

#[tokio::test]
async fn test_override_demo_product_is_not_persisted() {
    let app = TestApp::empty();
    let (status, body) = app
        .put_json(&format!("{LIST}/demo-1"), &json!({"cost_per_unit": 3.5}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["demoMode"], true);
    assert_eq!(body["message"], "Demo mode - changes not persisted");
}

#[tokio::test]
async fn test_override_unlisted_demo_id_is_not_persisted() {
    let app = TestApp::new(catalog());
    let (status, body) = app
        .put_json(&format!("{LIST}/demo-99"), &json!({"cost_per_unit": 3.5}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["demoMode"], true);
    assert_eq!(body["message"], "Demo mode - changes not persisted");

    let (_, costs) = app.get(&format!("{LIST}?sort=name")).await;
    assert_amount(&costs["products"][1]["cost_per_unit"], 4.26);
}

#[tokio::test]
async fn test_override_without_cost_table() {
    let app = TestApp::new(catalog());
    app.store.set_overrides_supported(false);

    let (status, body) = app
        .put_json(&format!("{LIST}/p-1"), &json!({"cost_per_unit": 3.5}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["demoMode"], true);
    assert_eq!(
        body["message"],
        "Product costs table not set up - using mock data"
    );
}

#[tokio::test]
async fn test_override_write_failure_is_soft() {
    let app = TestApp::new(catalog());
    app.store.set_fail_writes(true);

    let (status, body) = app
        .put_json(&format!("{LIST}/p-1"), &json!({"cost_per_unit": 3.5}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["demoMode"], true);
    assert_eq!(
        body["message"],
        "Could not save to database - operating in demo mode"
    );

    // Nothing was written, so the list still shows the computed cost
    let (_, list) = app.get(&format!("{LIST}?sort=name")).await;
    assert_amount(&list["products"][1]["cost_per_unit"], 4.26);
}

#[tokio::test]
async fn test_override_rejects_negative_amounts() {
    let app = TestApp::new(catalog());
    let (status, body) = app
        .put_json(&format!("{LIST}/p-1"), &json!({"labor_cost": -1.0}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("labor_cost"));
}

#[tokio::test]
async fn test_override_rejects_malformed_body() {
    let app = TestApp::new(catalog());
    let (status, _) = app
        .put_json(&format!("{LIST}/p-1"), &json!({"cost_per_unit": "cheap"}))
        .await;
    assert!(status.is_client_error());
}

// ============================================================================
// Live server
// ============================================================================

/// Base URL for the admin API (configurable via environment).
fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

#[tokio::test]
#[ignore = "requires a running admin server"]
async fn test_live_server_lists_products() {
    let client = reqwest::Client::new();
    let resp = client
        .get(format!("{}{LIST}", admin_base_url()))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let body: Value = resp.json().await.unwrap();
    assert!(body["products"].is_array());
    assert!(body["demoMode"].is_boolean());
}
