//! In-process catalog store.
//!
//! Backs the API when no database is configured and stands in for
//! `PostgreSQL` in tests. Reads and writes can be made to fail, and cost
//! overrides can be switched off, to exercise the demo-data fallbacks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use drizzl_core::ProductId;

use super::{CatalogStore, CostOverrideSupport, RepositoryError};
use crate::models::{Ingredient, Product, ProductCost};

/// Catalog store held in memory.
#[derive(Debug)]
pub struct MemoryCatalogStore {
    products: RwLock<Vec<Product>>,
    costs: RwLock<HashMap<ProductId, ProductCost>>,
    ingredients: RwLock<HashMap<ProductId, Vec<Ingredient>>>,
    unreachable: AtomicBool,
    fail_writes: AtomicBool,
    overrides_supported: AtomicBool,
}

impl Default for MemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCatalogStore {
    /// An empty store that supports cost overrides.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: RwLock::new(Vec::new()),
            costs: RwLock::new(HashMap::new()),
            ingredients: RwLock::new(HashMap::new()),
            unreachable: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            overrides_supported: AtomicBool::new(true),
        }
    }

    /// Add catalog products.
    #[must_use]
    pub fn with_products(mut self, products: impl IntoIterator<Item = Product>) -> Self {
        self.products.get_mut().extend(products);
        self
    }

    /// Add a persisted cost record.
    #[must_use]
    pub fn with_cost(mut self, cost: ProductCost) -> Self {
        self.costs.get_mut().insert(cost.product_id.clone(), cost);
        self
    }

    /// Record a product's ingredient list.
    #[must_use]
    pub fn with_ingredients(mut self, product_id: ProductId, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients.get_mut().insert(product_id, ingredients);
        self
    }

    /// Make every read fail as if the store were unreachable.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::Relaxed);
    }

    /// Make cost writes fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Report cost overrides as supported or not.
    pub fn set_overrides_supported(&self, supported: bool) {
        self.overrides_supported.store(supported, Ordering::Relaxed);
    }

    fn check_reachable(&self) -> Result<(), RepositoryError> {
        if self.unreachable.load(Ordering::Relaxed) {
            return Err(RepositoryError::Unavailable(
                "memory store marked unreachable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list_products(&self, active_only: bool) -> Result<Vec<Product>, RepositoryError> {
        self.check_reachable()?;
        let mut products: Vec<Product> = self
            .products
            .read()
            .await
            .iter()
            .filter(|p| !active_only || p.is_active)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        self.check_reachable()?;
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }

    async fn list_product_costs(&self) -> Result<Vec<ProductCost>, RepositoryError> {
        self.check_reachable()?;
        Ok(self.costs.read().await.values().cloned().collect())
    }

    async fn get_product_cost(
        &self,
        id: &ProductId,
    ) -> Result<Option<ProductCost>, RepositoryError> {
        self.check_reachable()?;
        Ok(self.costs.read().await.get(id).cloned())
    }

    async fn list_ingredients(&self, id: &ProductId) -> Result<Vec<Ingredient>, RepositoryError> {
        self.check_reachable()?;
        Ok(self
            .ingredients
            .read()
            .await
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    async fn cost_override_support(&self) -> CostOverrideSupport {
        if self.overrides_supported.load(Ordering::Relaxed) {
            CostOverrideSupport::Supported
        } else {
            CostOverrideSupport::Unsupported {
                reason: "cost overrides disabled".to_string(),
            }
        }
    }

    async fn upsert_product_cost(&self, cost: &ProductCost) -> Result<ProductCost, RepositoryError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(RepositoryError::Unavailable(
                "memory store rejected write".to_string(),
            ));
        }
        self.costs
            .write()
            .await
            .insert(cost.product_id.clone(), cost.clone());
        Ok(cost.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use drizzl_core::{Cents, ProductCostId};

    fn product(id: &str, name: &str, is_active: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: None,
            category: Some("smoothies".to_string()),
            price_cents: Cents::new(899),
            wholesale_price_cents: Cents::new(599),
            is_active,
        }
    }

    fn cost(product_id: &str) -> ProductCost {
        ProductCost {
            id: ProductCostId::new(format!("cost-{product_id}")),
            product_id: ProductId::new(product_id),
            cost_per_unit: dec!(4),
            margin_per_unit: dec!(4.99),
            ingredients_cost: dec!(2),
            packaging_cost: dec!(1),
            labor_cost: dec!(1),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_products_sorted_and_filtered() {
        let store = MemoryCatalogStore::new().with_products([
            product("b", "Zesty", true),
            product("a", "Apple", false),
            product("c", "Mango", true),
        ]);

        let all = store.list_products(false).await.unwrap();
        let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Apple", "Mango", "Zesty"]);

        let active = store.list_products(true).await.unwrap();
        assert_eq!(active.len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_fails_reads() {
        let store = MemoryCatalogStore::new().with_products([product("a", "Apple", true)]);
        store.set_unreachable(true);

        assert!(matches!(
            store.list_products(false).await,
            Err(RepositoryError::Unavailable(_))
        ));
        assert!(store.get_product(&ProductId::new("a")).await.is_err());
        assert!(store.ping().await.is_err());

        store.set_unreachable(false);
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_upsert_is_last_write_wins() {
        let store = MemoryCatalogStore::new();
        store.upsert_product_cost(&cost("a")).await.unwrap();

        let mut newer = cost("a");
        newer.cost_per_unit = dec!(3.25);
        store.upsert_product_cost(&newer).await.unwrap();

        let stored = store.get_product_cost(&ProductId::new("a")).await.unwrap();
        assert_eq!(stored.map(|c| c.cost_per_unit), Some(dec!(3.25)));
        assert_eq!(store.list_product_costs().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_write_failure_and_capability() {
        let store = MemoryCatalogStore::new();
        assert_eq!(
            store.cost_override_support().await,
            CostOverrideSupport::Supported
        );

        store.set_overrides_supported(false);
        assert!(matches!(
            store.cost_override_support().await,
            CostOverrideSupport::Unsupported { .. }
        ));

        store.set_fail_writes(true);
        assert!(store.upsert_product_cost(&cost("a")).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_ingredients_are_empty() {
        let store = MemoryCatalogStore::new();
        let ingredients = store.list_ingredients(&ProductId::new("a")).await.unwrap();
        assert!(ingredients.is_empty());
    }
}
