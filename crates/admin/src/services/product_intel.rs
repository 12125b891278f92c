//! Product intelligence orchestration.
//!
//! Reads the catalog, feeds the margin engine and applies the demo-data
//! policy: upstream read failures never reach the caller, they degrade to the
//! built-in demo catalog with an explanatory note. A detail lookup is the
//! exception: an unknown product ID is not found, and a catalog that cannot be
//! read is an error. A negative cost amount is rejected.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{instrument, warn};

use drizzl_core::ProductId;

use crate::db::{CatalogStore, CostOverrideSupport, RepositoryError};
use crate::intel::MarginEngine;
use crate::intel::demo::{demo_catalog, demo_product};
use crate::models::{
    CostOverrideInput, Product, ProductCost, ProductDetails, ProductWithCosts, Sourced,
};

pub const EMPTY_CATALOG_NOTE: &str = "No products found - showing demo data";
pub const CATALOG_UNAVAILABLE_NOTE: &str = "Could not load products - showing demo data";
pub const DEMO_PRODUCT_NOTE: &str = "Demo product - showing synthesized data";
pub const DEMO_WRITE_NOTE: &str = "Demo mode - changes not persisted";
pub const OVERRIDES_UNSUPPORTED_NOTE: &str = "Product costs table not set up - using mock data";
pub const WRITE_FAILED_NOTE: &str = "Could not save to database - operating in demo mode";

/// Errors surfaced to callers of [`ProductIntelService`].
#[derive(Debug, Error)]
pub enum IntelError {
    /// The ID resolves in neither the catalog nor the demo catalog.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// A cost amount was rejected.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The catalog could not be read.
    #[error("catalog unavailable: {0}")]
    Store(#[from] RepositoryError),
}

/// Every product with its margin, plus portfolio advisories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portfolio {
    pub products: Vec<ProductWithCosts>,
    pub suggestions: Vec<String>,
}

/// List, detail and cost-override operations over a catalog store.
#[derive(Clone)]
pub struct ProductIntelService {
    store: Arc<dyn CatalogStore>,
    engine: MarginEngine,
}

impl ProductIntelService {
    /// Create a new product intelligence service.
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>, engine: MarginEngine) -> Self {
        Self { store, engine }
    }

    /// Every product with its costs and margin, plus portfolio advisories.
    ///
    /// Falls back to the demo catalog when the store is empty or unreachable.
    #[instrument(skip(self))]
    pub async fn list(&self, active_only: bool) -> Sourced<Portfolio> {
        match self.store.list_products(active_only).await {
            Ok(products) if !products.is_empty() => {
                let costs = self.persisted_costs().await;
                let rows = products
                    .into_iter()
                    .map(|product| match costs.get(&product.id) {
                        Some(cost) => self.engine.with_persisted_cost(product, cost),
                        None => self.engine.with_costs(product),
                    })
                    .collect();
                Sourced::real(self.portfolio(rows))
            }
            Ok(_) => {
                tracing::info!("Catalog is empty, serving demo catalog");
                Sourced::demo(self.demo_portfolio(active_only), EMPTY_CATALOG_NOTE)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load products, serving demo catalog");
                Sourced::demo(self.demo_portfolio(active_only), CATALOG_UNAVAILABLE_NOTE)
            }
        }
    }

    /// Full breakdown for one product.
    ///
    /// Demo IDs always resolve to the demo catalog, whatever the store holds.
    ///
    /// # Errors
    ///
    /// Returns `IntelError::NotFound` if the ID resolves nowhere, or
    /// `IntelError::Store` if the product lookup fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn detail(&self, id: &ProductId) -> Result<Sourced<ProductDetails>, IntelError> {
        if let Some(product) = demo_product(id) {
            let details = self.engine.details(product, None, Vec::new());
            return Ok(Sourced::demo(details, DEMO_PRODUCT_NOTE));
        }

        let Some(product) = self.store.get_product(id).await? else {
            return Err(IntelError::NotFound(id.clone()));
        };

        let (cost, ingredients) = tokio::join!(
            self.store.get_product_cost(id),
            self.store.list_ingredients(id)
        );
        let cost = cost.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load persisted cost, using computed cost");
            None
        });
        let ingredients = ingredients.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load ingredients, using category recipe");
            Vec::new()
        });

        Ok(Sourced::real(self.engine.details(
            product,
            cost.as_ref(),
            ingredients,
        )))
    }

    /// Persist a unit cost override for one product.
    ///
    /// Writes are best-effort: anything that prevents persisting is reported
    /// as demo data with a note, never as an error.
    ///
    /// # Errors
    ///
    /// Returns `IntelError::InvalidInput` if any amount is negative.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn override_cost(
        &self,
        id: &ProductId,
        input: CostOverrideInput,
    ) -> Result<Sourced<Option<ProductCost>>, IntelError> {
        if let Some(field) = input.first_negative_field() {
            return Err(IntelError::InvalidInput(format!(
                "{field} must not be negative"
            )));
        }

        if id.is_demo() {
            return Ok(Sourced::demo(None, DEMO_WRITE_NOTE));
        }

        if let CostOverrideSupport::Unsupported { reason } =
            self.store.cost_override_support().await
        {
            warn!(%reason, "Cost overrides unsupported, change not persisted");
            return Ok(Sourced::demo(None, OVERRIDES_UNSUPPORTED_NOTE));
        }

        let price = match self.store.get_product(id).await {
            Ok(product) => product.map(|p| p.price_cents),
            Err(e) => {
                warn!(error = %e, "Failed to load product price, storing zero margin");
                None
            }
        };

        let cost = input.into_cost(id.clone(), price, Utc::now());
        match self.store.upsert_product_cost(&cost).await {
            Ok(saved) => {
                tracing::info!(cost_per_unit = %saved.cost_per_unit, "Cost override saved");
                Ok(Sourced::real(Some(saved)))
            }
            Err(e) => {
                warn!(error = %e, "Failed to save cost override");
                Ok(Sourced::demo(None, WRITE_FAILED_NOTE))
            }
        }
    }

    async fn persisted_costs(&self) -> HashMap<ProductId, ProductCost> {
        match self.store.list_product_costs().await {
            Ok(costs) => costs
                .into_iter()
                .map(|c| (c.product_id.clone(), c))
                .collect(),
            Err(e) => {
                warn!(error = %e, "Failed to load persisted costs, using computed costs");
                HashMap::new()
            }
        }
    }

    fn demo_portfolio(&self, active_only: bool) -> Portfolio {
        let rows = demo_catalog()
            .into_iter()
            .filter(|p: &Product| !active_only || p.is_active)
            .map(|p| self.engine.with_costs(p))
            .collect();
        self.portfolio(rows)
    }

    fn portfolio(&self, products: Vec<ProductWithCosts>) -> Portfolio {
        let suggestions = self.engine.suggestions(&products);
        Portfolio {
            products,
            suggestions,
        }
    }
}
