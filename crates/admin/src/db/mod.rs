//! Catalog storage for the admin back-office.
//!
//! ## Tables
//!
//! - `products` - Catalog products (read-only to the margin engine)
//! - `product_costs` - Persisted per-product unit cost overrides (optional)
//! - `product_ingredients` - Recorded recipes with JSONB nutrition facts
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p drizzl-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use drizzl_core::ProductId;

use crate::models::{Ingredient, Product, ProductCost};

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The store cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Whether a store can persist cost overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostOverrideSupport {
    Supported,
    Unsupported { reason: String },
}

/// Read access to the catalog plus the single cost-override write.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Products ordered by name, optionally only active ones.
    async fn list_products(&self, active_only: bool) -> Result<Vec<Product>, RepositoryError>;

    /// One product by ID.
    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Every persisted cost record.
    async fn list_product_costs(&self) -> Result<Vec<ProductCost>, RepositoryError>;

    /// The persisted cost record for one product.
    async fn get_product_cost(&self, id: &ProductId)
    -> Result<Option<ProductCost>, RepositoryError>;

    /// Recorded ingredients for one product (empty when none are recorded).
    async fn list_ingredients(&self, id: &ProductId) -> Result<Vec<Ingredient>, RepositoryError>;

    /// Whether [`CatalogStore::upsert_product_cost`] can succeed.
    async fn cost_override_support(&self) -> CostOverrideSupport;

    /// Insert or replace the cost record for `cost.product_id`.
    async fn upsert_product_cost(&self, cost: &ProductCost) -> Result<ProductCost, RepositoryError>;

    /// Cheap connectivity check used by the readiness check.
    async fn ping(&self) -> Result<(), RepositoryError> {
        self.list_products(true).await.map(|_| ())
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
