//! Margin engine.
//!
//! Pure computation over catalog data: unit cost, D2C and wholesale margins,
//! break-even volume, nutrition totals and portfolio advisories. Nothing here
//! touches storage; the [`crate::services`] layer decides what to feed it.
//!
//! # Modules
//!
//! - [`config`] - Cost tables, overhead rate and advisory thresholds
//! - [`templates`] - Stand-in recipes for products without recorded ingredients
//! - [`costing`] - Unit cost, margin and break-even arithmetic
//! - [`nutrition`] - Nutrition aggregation and display rounding
//! - [`suggestions`] - Portfolio advisories
//! - [`demo`] - Built-in demo catalog

pub mod config;
pub mod costing;
pub mod demo;
pub mod nutrition;
pub mod suggestions;
pub mod templates;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use drizzl_core::{Category, ProductCostId, ProductId};

use crate::models::{
    Ingredient, MarginTier, Product, ProductCost, ProductDetails, ProductWithCosts, ProfitAnalysis,
};

pub use config::{CategoryCosts, CostTable, EngineConfig, SuggestionThresholds};
use costing::{Margin, UnitCost, break_even_units, round_money, round_percent};

/// Computes cost and margin views from catalog data.
#[derive(Debug, Clone, Default)]
pub struct MarginEngine {
    config: EngineConfig,
}

impl MarginEngine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The category recipe stamped with `product_id`.
    ///
    /// Unknown categories get the smoothies recipe.
    #[must_use]
    pub fn synthesize_ingredients(&self, product_id: &ProductId, category: Category) -> Vec<Ingredient> {
        templates::templates_for(category)
            .iter()
            .map(|t| t.instantiate(product_id))
            .collect()
    }

    /// Unrounded unit cost of `product` made from `ingredients`.
    fn unit_cost(&self, product: &Product, ingredients: &[Ingredient]) -> UnitCost {
        UnitCost::compute(
            ingredients,
            self.config.costs.get(product.cost_category()),
            self.config.overhead_rate,
        )
    }

    /// List row for a product priced from its category recipe.
    #[must_use]
    pub fn with_costs(&self, product: Product) -> ProductWithCosts {
        let ingredients = self.synthesize_ingredients(&product.id, product.cost_category());
        let cost = self.unit_cost(&product, &ingredients);
        summarize(product, &cost)
    }

    /// List row for a product with a persisted cost record.
    ///
    /// The margin is taken against the recorded `cost_per_unit`.
    #[must_use]
    pub fn with_persisted_cost(&self, product: Product, cost: &ProductCost) -> ProductWithCosts {
        let margin = Margin::compute(product.price_cents.to_dollars(), cost.cost_per_unit);
        let margin_percent = round_percent(margin.percent);

        ProductWithCosts {
            product,
            cost_per_unit: round_money(cost.cost_per_unit),
            margin: round_money(margin.amount),
            margin_percent,
            ingredients_cost: round_money(cost.ingredients_cost),
            packaging_cost: round_money(cost.packaging_cost),
            labor_cost: round_money(cost.labor_cost),
            margin_tier: MarginTier::classify(margin_percent),
        }
    }

    /// Full detail view.
    ///
    /// A non-empty `ingredients` list replaces the category recipe. A persisted
    /// `cost` overrides the headline cost figures and the profit analysis; the
    /// cost breakdown is always computed from the ingredient list in effect.
    #[must_use]
    pub fn details(
        &self,
        product: Product,
        cost: Option<&ProductCost>,
        ingredients: Vec<Ingredient>,
    ) -> ProductDetails {
        let ingredients = if ingredients.is_empty() {
            self.synthesize_ingredients(&product.id, product.cost_category())
        } else {
            ingredients
        };

        let computed = self.unit_cost(&product, &ingredients);
        let effective_cost = cost.map_or(computed.total, |c| c.cost_per_unit);
        let profit_analysis = self.profit_analysis(&product, effective_cost);
        let summary = match cost {
            Some(cost) => self.with_persisted_cost(product, cost),
            None => summarize(product, &computed),
        };

        ProductDetails {
            summary,
            nutrition_totals: nutrition::aggregate(&ingredients).rounded(),
            ingredients,
            cost_breakdown: computed.breakdown(),
            profit_analysis,
        }
    }

    /// D2C and wholesale margins plus break-even volume at `unit_cost`.
    #[must_use]
    pub fn profit_analysis(&self, product: &Product, unit_cost: Decimal) -> ProfitAnalysis {
        let d2c = Margin::compute(product.price_cents.to_dollars(), unit_cost);
        let wholesale = Margin::compute(product.wholesale_price_cents.to_dollars(), unit_cost);

        ProfitAnalysis {
            d2c_margin: round_money(d2c.amount),
            d2c_margin_percent: round_percent(d2c.percent),
            wholesale_margin: round_money(wholesale.amount),
            wholesale_margin_percent: round_percent(wholesale.percent),
            break_even_units: break_even_units(self.config.fixed_monthly_costs, d2c.amount),
        }
    }

    /// Portfolio advisories over a computed list.
    #[must_use]
    pub fn suggestions(&self, products: &[ProductWithCosts]) -> Vec<String> {
        suggestions::generate(products, &self.config.thresholds)
    }

    /// A cost record derived from the category recipe, ready to persist.
    #[must_use]
    pub fn synthesize_cost(&self, product: &Product, now: DateTime<Utc>) -> ProductCost {
        let ingredients = self.synthesize_ingredients(&product.id, product.cost_category());
        let cost = self.unit_cost(product, &ingredients);
        let margin = Margin::compute(product.price_cents.to_dollars(), cost.total);

        ProductCost {
            id: ProductCostId::new(format!("cost-{}", product.id)),
            product_id: product.id.clone(),
            cost_per_unit: round_money(cost.total),
            margin_per_unit: round_money(margin.amount),
            ingredients_cost: round_money(cost.ingredients),
            packaging_cost: round_money(cost.packaging),
            labor_cost: round_money(cost.labor),
            updated_at: now,
        }
    }
}

fn summarize(product: Product, cost: &UnitCost) -> ProductWithCosts {
    let margin = Margin::compute(product.price_cents.to_dollars(), cost.total);
    let margin_percent = round_percent(margin.percent);

    ProductWithCosts {
        product,
        cost_per_unit: round_money(cost.total),
        margin: round_money(margin.amount),
        margin_percent,
        ingredients_cost: round_money(cost.ingredients),
        packaging_cost: round_money(cost.packaging),
        labor_cost: round_money(cost.labor),
        margin_tier: MarginTier::classify(margin_percent),
    }
}
