//! Ingredient lines and nutrition facts.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use drizzl_core::{IngredientId, ProductId};

/// One ingredient of a product recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient line ID (`{productId}-{templateId}` when synthesized).
    pub id: IngredientId,
    /// Product this ingredient belongs to.
    pub product_id: ProductId,
    /// Ingredient name.
    pub ingredient_name: String,
    /// Weight per serving, in grams.
    pub weight_grams: Decimal,
    /// Cost per gram, in dollars.
    pub cost_per_gram: Decimal,
    /// Nutrition facts for `weight_grams` of this ingredient.
    #[serde(default)]
    pub nutrition_data: NutritionData,
    /// Supplier name.
    #[serde(default)]
    pub supplier: Option<String>,
}

impl Ingredient {
    /// Cost of this ingredient line (`weight_grams * cost_per_gram`).
    #[must_use]
    pub fn line_cost(&self) -> Decimal {
        self.weight_grams * self.cost_per_gram
    }
}

/// Nutrition facts for an ingredient line.
///
/// Every field reads as zero when absent or `null` in the stored JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionData {
    #[serde(deserialize_with = "zero_if_null")]
    pub calories: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub protein: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub carbs: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub fat: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub fiber: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub sugar: Decimal,
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Decimal>::deserialize(deserializer).map(Option::unwrap_or_default)
}
