//! Derived product-intelligence views.
//!
//! Everything in this module is recomputed on each request and never stored.
//! Money fields are rounded to cents and percentages to one decimal place
//! by the margin engine before they land here.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{Ingredient, Product};

/// Where a payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Read from the catalog store.
    Real,
    /// Substituted from the built-in demo catalog.
    Demo,
}

/// A payload tagged with its source and an optional operator-facing note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sourced<T> {
    pub data: T,
    pub source: DataSource,
    pub note: Option<String>,
}

impl<T> Sourced<T> {
    /// Data read from the catalog store.
    pub const fn real(data: T) -> Self {
        Self {
            data,
            source: DataSource::Real,
            note: None,
        }
    }

    /// Demo data substituted for the reason given in `note`.
    pub fn demo(data: T, note: impl Into<String>) -> Self {
        Self {
            data,
            source: DataSource::Demo,
            note: Some(note.into()),
        }
    }

    /// Whether the payload is demo data.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.source == DataSource::Demo
    }
}

/// Margin health band, as coloured in the admin product table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginTier {
    /// 50% and above.
    Healthy,
    /// 30% up to 50%.
    Fair,
    /// Below 30%.
    Low,
}

impl MarginTier {
    /// Classify a (rounded) margin percentage.
    #[must_use]
    pub fn classify(margin_percent: Decimal) -> Self {
        if margin_percent >= Decimal::from(50) {
            Self::Healthy
        } else if margin_percent >= Decimal::from(30) {
            Self::Fair
        } else {
            Self::Low
        }
    }
}

/// A catalog product with its unit cost and D2C margin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductWithCosts {
    #[serde(flatten)]
    pub product: Product,
    pub cost_per_unit: Decimal,
    pub margin: Decimal,
    pub margin_percent: Decimal,
    pub ingredients_cost: Decimal,
    pub packaging_cost: Decimal,
    pub labor_cost: Decimal,
    pub margin_tier: MarginTier,
}

/// Unit cost split into its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub ingredients: Decimal,
    pub packaging: Decimal,
    pub labor: Decimal,
    pub overhead: Decimal,
    pub total: Decimal,
}

/// D2C and wholesale profitability of one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfitAnalysis {
    pub d2c_margin: Decimal,
    pub d2c_margin_percent: Decimal,
    pub wholesale_margin: Decimal,
    pub wholesale_margin_percent: Decimal,
    /// Monthly units needed to cover fixed costs (0 when the D2C margin is not positive).
    pub break_even_units: u64,
}

/// Per-serving nutrition summed across a product's ingredients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NutritionTotals {
    pub calories: Decimal,
    pub protein: Decimal,
    pub carbs: Decimal,
    pub fat: Decimal,
    pub fiber: Decimal,
    pub sugar: Decimal,
}

/// Full breakdown for the product detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub summary: ProductWithCosts,
    pub ingredients: Vec<Ingredient>,
    pub nutrition_totals: NutritionTotals,
    pub cost_breakdown: CostBreakdown,
    pub profit_analysis: ProfitAnalysis,
}
