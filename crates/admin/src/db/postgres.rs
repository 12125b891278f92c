//! `PostgreSQL` catalog store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use drizzl_core::{Cents, IngredientId, ProductCostId, ProductId};

use super::{CatalogStore, CostOverrideSupport, RepositoryError};
use crate::models::{Ingredient, NutritionData, Product, ProductCost};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    slug: String,
    description: Option<String>,
    category: Option<String>,
    price_cents: i64,
    wholesale_price_cents: i64,
    is_active: bool,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        if row.price_cents < 0 || row.wholesale_price_cents < 0 {
            return Err(RepositoryError::DataCorruption(format!(
                "product {} has a negative price",
                row.id
            )));
        }

        Ok(Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            category: row.category,
            price_cents: Cents::new(row.price_cents),
            wholesale_price_cents: Cents::new(row.wholesale_price_cents),
            is_active: row.is_active,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductCostRow {
    id: ProductCostId,
    product_id: ProductId,
    cost_per_unit: Decimal,
    margin_per_unit: Decimal,
    ingredients_cost: Decimal,
    packaging_cost: Decimal,
    labor_cost: Decimal,
    updated_at: DateTime<Utc>,
}

impl From<ProductCostRow> for ProductCost {
    fn from(row: ProductCostRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            cost_per_unit: row.cost_per_unit,
            margin_per_unit: row.margin_per_unit,
            ingredients_cost: row.ingredients_cost,
            packaging_cost: row.packaging_cost,
            labor_cost: row.labor_cost,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct IngredientRow {
    id: IngredientId,
    product_id: ProductId,
    ingredient_name: String,
    weight_grams: Decimal,
    cost_per_gram: Decimal,
    nutrition_data: Option<serde_json::Value>,
    supplier: Option<String>,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        let nutrition_data = row
            .nutrition_data
            .map(serde_json::from_value::<NutritionData>)
            .transpose()
            .unwrap_or_else(|e| {
                tracing::warn!(ingredient_id = %row.id, error = %e, "Malformed nutrition data");
                None
            })
            .unwrap_or_default();

        Self {
            id: row.id,
            product_id: row.product_id,
            ingredient_name: row.ingredient_name,
            weight_grams: row.weight_grams,
            cost_per_gram: row.cost_per_gram,
            nutrition_data,
            supplier: row.supplier,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, slug, description, category, price_cents, \
                               wholesale_price_cents, is_active";

const COST_COLUMNS: &str = "id, product_id, cost_per_unit, margin_per_unit, ingredients_cost, \
                            packaging_cost, labor_cost, updated_at";

// =============================================================================
// Store
// =============================================================================

/// Catalog store backed by the admin `PostgreSQL` database.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a catalog product, or update the product that already has its slug.
    ///
    /// Returns the stored product ID, which is the existing one on a slug match.
    ///
    /// # Errors
    ///
    /// Returns error if the database write fails.
    #[instrument(skip(self, product), fields(slug = %product.slug))]
    pub async fn upsert_product(&self, product: &Product) -> Result<ProductId, RepositoryError> {
        let id = sqlx::query_scalar::<_, ProductId>(
            r"
            INSERT INTO products (
                id, name, slug, description, category,
                price_cents, wholesale_price_cents, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (slug) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                category = EXCLUDED.category,
                price_cents = EXCLUDED.price_cents,
                wholesale_price_cents = EXCLUDED.wholesale_price_cents,
                is_active = EXCLUDED.is_active
            RETURNING id
            ",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.slug)
        .bind(product.description.as_deref())
        .bind(product.category.as_deref())
        .bind(product.price_cents.as_i64())
        .bind(product.wholesale_price_cents.as_i64())
        .bind(product.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    #[instrument(skip(self))]
    async fn list_products(&self, active_only: bool) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE ($1 = FALSE OR is_active) \
             ORDER BY name ASC"
        ))
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_product_costs(&self) -> Result<Vec<ProductCost>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductCostRow>(&format!(
            "SELECT {COST_COLUMNS} FROM product_costs"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_product_cost(
        &self,
        id: &ProductId,
    ) -> Result<Option<ProductCost>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductCostRow>(&format!(
            "SELECT {COST_COLUMNS} FROM product_costs WHERE product_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn list_ingredients(&self, id: &ProductId) -> Result<Vec<Ingredient>, RepositoryError> {
        let rows = sqlx::query_as::<_, IngredientRow>(
            r"
            SELECT id, product_id, ingredient_name, weight_grams, cost_per_gram,
                   nutrition_data, supplier
            FROM product_ingredients
            WHERE product_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn cost_override_support(&self) -> CostOverrideSupport {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT to_regclass('product_costs') IS NOT NULL",
        )
        .fetch_one(&self.pool)
        .await;

        match exists {
            Ok(true) => CostOverrideSupport::Supported,
            Ok(false) => CostOverrideSupport::Unsupported {
                reason: "product_costs table does not exist".to_string(),
            },
            Err(e) => CostOverrideSupport::Unsupported {
                reason: e.to_string(),
            },
        }
    }

    #[instrument(skip(self, cost), fields(product_id = %cost.product_id))]
    async fn upsert_product_cost(&self, cost: &ProductCost) -> Result<ProductCost, RepositoryError> {
        let row = sqlx::query_as::<_, ProductCostRow>(&format!(
            "INSERT INTO product_costs ( \
                 id, product_id, cost_per_unit, margin_per_unit, \
                 ingredients_cost, packaging_cost, labor_cost, updated_at \
             ) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (product_id) DO UPDATE SET \
                 cost_per_unit = EXCLUDED.cost_per_unit, \
                 margin_per_unit = EXCLUDED.margin_per_unit, \
                 ingredients_cost = EXCLUDED.ingredients_cost, \
                 packaging_cost = EXCLUDED.packaging_cost, \
                 labor_cost = EXCLUDED.labor_cost, \
                 updated_at = EXCLUDED.updated_at \
             RETURNING {COST_COLUMNS}"
        ))
        .bind(&cost.id)
        .bind(&cost.product_id)
        .bind(cost.cost_per_unit)
        .bind(cost.margin_per_unit)
        .bind(cost.ingredients_cost)
        .bind(cost.packaging_cost)
        .bind(cost.labor_cost)
        .bind(cost.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
