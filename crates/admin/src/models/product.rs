//! Catalog product and persisted cost models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use drizzl_core::{Category, Cents, ProductCostId, ProductId};

/// A catalog product (read-only to the margin engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Marketing description.
    #[serde(default)]
    pub description: Option<String>,
    /// Free-text category label (e.g. "smoothies", "high-protein").
    #[serde(default)]
    pub category: Option<String>,
    /// Direct-to-consumer price.
    pub price_cents: Cents,
    /// Wholesale (B2B) price.
    pub wholesale_price_cents: Cents,
    /// Whether the product is currently sold.
    pub is_active: bool,
}

impl Product {
    /// The category label used for display and portfolio grouping.
    ///
    /// Missing or blank categories read as "smoothies".
    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(Category::Smoothies.as_str())
    }

    /// The category used for cost-table lookups.
    #[must_use]
    pub fn cost_category(&self) -> Category {
        Category::resolve(Some(self.category_label()))
    }
}

/// A persisted per-product cost record (overrides the synthesized costs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCost {
    /// Unique cost record ID.
    pub id: ProductCostId,
    /// Product this cost record belongs to.
    pub product_id: ProductId,
    /// Total unit cost.
    pub cost_per_unit: Decimal,
    /// D2C price minus unit cost, as of the last write.
    pub margin_per_unit: Decimal,
    /// Ingredient cost component.
    pub ingredients_cost: Decimal,
    /// Packaging cost component.
    pub packaging_cost: Decimal,
    /// Labor cost component.
    pub labor_cost: Decimal,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

/// Request body for overriding a product's unit costs.
///
/// Missing fields are treated as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CostOverrideInput {
    #[serde(default)]
    pub cost_per_unit: Option<Decimal>,
    #[serde(default)]
    pub ingredients_cost: Option<Decimal>,
    #[serde(default)]
    pub packaging_cost: Option<Decimal>,
    #[serde(default)]
    pub labor_cost: Option<Decimal>,
}

impl CostOverrideInput {
    /// Name of the first negative amount, if any.
    #[must_use]
    pub fn first_negative_field(&self) -> Option<&'static str> {
        [
            ("cost_per_unit", self.cost_per_unit),
            ("ingredients_cost", self.ingredients_cost),
            ("packaging_cost", self.packaging_cost),
            ("labor_cost", self.labor_cost),
        ]
        .into_iter()
        .find(|(_, value)| value.is_some_and(|v| v.is_sign_negative() && !v.is_zero()))
        .map(|(name, _)| name)
    }

    /// Build the cost record to persist for `product_id`.
    ///
    /// `price` is the product's D2C price when it resolves; the stored margin
    /// is zero otherwise.
    #[must_use]
    pub fn into_cost(
        self,
        product_id: ProductId,
        price: Option<Cents>,
        now: DateTime<Utc>,
    ) -> ProductCost {
        let cost_per_unit = self.cost_per_unit.unwrap_or_default();
        let margin_per_unit = price.map_or(Decimal::ZERO, |p| p.to_dollars() - cost_per_unit);

        ProductCost {
            id: ProductCostId::new(format!("cost-{product_id}")),
            product_id,
            cost_per_unit,
            margin_per_unit,
            ingredients_cost: self.ingredients_cost.unwrap_or_default(),
            packaging_cost: self.packaging_cost.unwrap_or_default(),
            labor_cost: self.labor_cost.unwrap_or_default(),
            updated_at: now,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(category: Option<&str>) -> Product {
        Product {
            id: ProductId::new("p-1"),
            name: "Test".to_string(),
            slug: "test".to_string(),
            description: None,
            category: category.map(String::from),
            price_cents: Cents::new(899),
            wholesale_price_cents: Cents::new(599),
            is_active: true,
        }
    }

    #[test]
    fn test_category_label_defaults() {
        assert_eq!(product(None).category_label(), "smoothies");
        assert_eq!(product(Some("  ")).category_label(), "smoothies");
        assert_eq!(product(Some("juices")).category_label(), "juices");
    }

    #[test]
    fn test_cost_category_unknown_uses_smoothies() {
        assert_eq!(product(Some("juices")).cost_category(), Category::Smoothies);
        assert_eq!(product(Some("bites")).cost_category(), Category::Bites);
    }

    #[test]
    fn test_cost_override_missing_fields_are_zero() {
        let input: CostOverrideInput =
            serde_json::from_str(r#"{"cost_per_unit": 4.5}"#).unwrap();
        let cost = input.into_cost(ProductId::new("p-1"), Some(Cents::new(899)), Utc::now());

        assert_eq!(cost.cost_per_unit, dec!(4.5));
        assert_eq!(cost.margin_per_unit, dec!(4.49));
        assert_eq!(cost.ingredients_cost, Decimal::ZERO);
        assert_eq!(cost.labor_cost, Decimal::ZERO);
        assert_eq!(cost.id.as_str(), "cost-p-1");
    }

    #[test]
    fn test_cost_override_without_price_has_zero_margin() {
        let input = CostOverrideInput {
            cost_per_unit: Some(dec!(3)),
            ..CostOverrideInput::default()
        };
        let cost = input.into_cost(ProductId::new("p-1"), None, Utc::now());
        assert_eq!(cost.margin_per_unit, Decimal::ZERO);
    }

    #[test]
    fn test_first_negative_field() {
        let input = CostOverrideInput {
            packaging_cost: Some(dec!(-0.5)),
            ..CostOverrideInput::default()
        };
        assert_eq!(input.first_negative_field(), Some("packaging_cost"));
        assert_eq!(CostOverrideInput::default().first_negative_field(), None);
    }
}
