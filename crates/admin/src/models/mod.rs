//! Domain models for the admin back-office.
//!
//! - [`product`] - Catalog rows and persisted cost records
//! - [`ingredient`] - Ingredient lines and their nutrition facts
//! - [`intel`] - Derived margin, cost and profitability views

pub mod ingredient;
pub mod intel;
pub mod product;

pub use ingredient::{Ingredient, NutritionData};
pub use intel::{
    CostBreakdown, DataSource, MarginTier, NutritionTotals, ProductDetails, ProductWithCosts,
    ProfitAnalysis, Sourced,
};
pub use product::{CostOverrideInput, Product, ProductCost};
