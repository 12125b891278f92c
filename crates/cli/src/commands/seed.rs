//! Seed the catalog with products.
//!
//! Products are inserted under fresh UUIDs since `demo-*` IDs are reserved for
//! the built-in demo catalog. A product whose slug already exists is updated in
//! place and keeps its ID, so seeding twice is safe. With `--with-costs`, each
//! product also gets a cost record synthesized from its category recipe.
//!
//! # Seed File Format
//!
//! ```yaml
//! products:
//!   - name: Mango Sunrise
//!     slug: mango-sunrise
//!     category: smoothies
//!     price_cents: 899
//!     wholesale_price_cents: 525
//! ```

use std::path::Path;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use drizzl_admin::config::AdminConfig;
use drizzl_admin::db::CatalogStore;
use drizzl_admin::intel::MarginEngine;
use drizzl_admin::intel::demo::demo_catalog;
use drizzl_admin::models::{Product, ProductCost};
use drizzl_core::{Cents, ProductId};

use super::{CliError, connect};

/// Top-level seed file document.
#[derive(Debug, Deserialize)]
struct SeedFile {
    products: Vec<SeedProduct>,
}

/// One product entry in a seed file.
#[derive(Debug, Deserialize)]
struct SeedProduct {
    name: String,
    slug: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    price_cents: i64,
    #[serde(default)]
    wholesale_price_cents: i64,
    #[serde(default = "default_active")]
    is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl SeedProduct {
    fn into_product(self, id: ProductId) -> Result<Product, CliError> {
        if self.name.trim().is_empty() || self.slug.trim().is_empty() {
            return Err(CliError::InvalidProduct(
                "name and slug must not be empty".to_string(),
            ));
        }
        if self.price_cents < 0 || self.wholesale_price_cents < 0 {
            return Err(CliError::InvalidProduct(format!(
                "{} has a negative price",
                self.slug
            )));
        }

        Ok(Product {
            id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            category: self.category,
            price_cents: Cents::new(self.price_cents),
            wholesale_price_cents: Cents::new(self.wholesale_price_cents),
            is_active: self.is_active,
        })
    }
}

fn fresh_id() -> ProductId {
    ProductId::new(Uuid::new_v4().to_string())
}

/// Parse and validate a YAML product list, assigning fresh IDs.
fn parse_products(content: &str) -> Result<Vec<Product>, CliError> {
    let file: SeedFile = serde_yaml::from_str(content)?;
    file.products
        .into_iter()
        .map(|entry| entry.into_product(fresh_id()))
        .collect()
}

/// The demo catalog re-keyed under fresh IDs.
fn demo_products() -> Vec<Product> {
    demo_catalog()
        .into_iter()
        .map(|product| Product {
            id: fresh_id(),
            ..product
        })
        .collect()
}

/// Synthesized cost record for `product`, keyed to the ID it was stored under.
fn seeded_cost(engine: &MarginEngine, product: Product, stored_id: ProductId) -> ProductCost {
    let product = Product {
        id: stored_id,
        ..product
    };
    engine.synthesize_cost(&product, Utc::now())
}

/// Seed the built-in demo products.
///
/// # Errors
///
/// Returns an error if the database URL is missing or a write fails.
pub async fn demo(with_costs: bool) -> Result<(), CliError> {
    insert(demo_products(), with_costs).await
}

/// Seed products from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or validated, the database URL
/// is missing, or a write fails.
pub async fn file(path: &Path, with_costs: bool) -> Result<(), CliError> {
    info!(path = %path.display(), "Loading products from file");

    // Read and validate before connecting to the database
    let content = tokio::fs::read_to_string(path).await?;
    let products = parse_products(&content)?;

    info!(products = products.len(), "Parsed seed file");
    insert(products, with_costs).await
}

async fn insert(products: Vec<Product>, with_costs: bool) -> Result<(), CliError> {
    let config = AdminConfig::from_env()?;
    let store = connect(&config).await?;
    let engine = MarginEngine::new(config.engine);

    let mut costs_written = 0_usize;
    let total = products.len();
    for product in products {
        // Re-seeding matches on slug and keeps the existing ID
        let stored_id = store.upsert_product(&product).await?;
        info!(product_id = %stored_id, name = %product.name, "Upserted product");

        if with_costs {
            let cost = seeded_cost(&engine, product, stored_id);
            store.upsert_product_cost(&cost).await?;
            costs_written += 1;
        }
    }

    info!("Seeding complete!");
    info!("  Products upserted: {total}");
    info!("  Cost records written: {costs_written}");
    Ok(())
}
