//! Unit cost, margin and break-even arithmetic.
//!
//! Intermediate values stay unrounded; [`round_money`] and [`round_percent`]
//! are applied once when a view is assembled.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CostBreakdown, Ingredient};

use super::config::CategoryCosts;

/// Round to `dp` places with midpoints going up, so -0.555 becomes -0.55.
#[must_use]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(dp, strategy)
}

/// Round a dollar amount to cents.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    round_half_up(value, 2)
}

/// Round a percentage to one decimal place.
#[must_use]
pub fn round_percent(value: Decimal) -> Decimal {
    round_half_up(value, 1)
}

/// Unrounded unit cost of one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitCost {
    pub ingredients: Decimal,
    pub packaging: Decimal,
    pub labor: Decimal,
    pub overhead: Decimal,
    pub total: Decimal,
}

impl UnitCost {
    /// Cost of `ingredients` plus the category's packaging, labor and overhead.
    #[must_use]
    pub fn compute(ingredients: &[Ingredient], costs: CategoryCosts, overhead_rate: Decimal) -> Self {
        let ingredients: Decimal = ingredients.iter().map(Ingredient::line_cost).sum();
        let subtotal = ingredients + costs.packaging + costs.labor;
        let overhead = subtotal * overhead_rate;

        Self {
            ingredients,
            packaging: costs.packaging,
            labor: costs.labor,
            overhead,
            total: subtotal + overhead,
        }
    }

    /// The rounded breakdown shown on the detail view.
    #[must_use]
    pub fn breakdown(&self) -> CostBreakdown {
        CostBreakdown {
            ingredients: round_money(self.ingredients),
            packaging: round_money(self.packaging),
            labor: round_money(self.labor),
            overhead: round_money(self.overhead),
            total: round_money(self.total),
        }
    }
}

/// Unrounded margin of a price over a unit cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin {
    /// Price minus cost, in dollars.
    pub amount: Decimal,
    /// Margin as a percentage of price; zero when the price is zero.
    pub percent: Decimal,
}

impl Margin {
    #[must_use]
    pub fn compute(price: Decimal, cost: Decimal) -> Self {
        let amount = price - cost;
        let percent = if price.is_zero() {
            Decimal::ZERO
        } else {
            amount * Decimal::ONE_HUNDRED / price
        };
        Self { amount, percent }
    }
}

/// Monthly units needed for `margin` to cover `fixed_costs`.
///
/// Zero when the margin is not positive.
#[must_use]
pub fn break_even_units(fixed_costs: Decimal, margin: Decimal) -> u64 {
    if margin <= Decimal::ZERO {
        return 0;
    }

    fixed_costs
        .checked_div(margin)
        .and_then(|units| units.ceil().to_u64())
        .unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use drizzl_core::{IngredientId, ProductId};

    use crate::models::NutritionData;

    fn line(grams: Decimal, per_gram: Decimal) -> Ingredient {
        Ingredient {
            id: IngredientId::new("p-1"),
            product_id: ProductId::new("p"),
            ingredient_name: "Line".to_string(),
            weight_grams: grams,
            cost_per_gram: per_gram,
            nutrition_data: NutritionData::default(),
            supplier: None,
        }
    }

    fn smoothie_costs() -> CategoryCosts {
        CategoryCosts {
            packaging: dec!(0.85),
            labor: dec!(0.45),
        }
    }

    #[test]
    fn test_unit_cost_matches_worked_example() {
        let lines = [
            line(dec!(80), dec!(0.003)),
            line(dec!(40), dec!(0.008)),
            line(dec!(120), dec!(0.002)),
            line(dec!(25), dec!(0.04)),
            line(dec!(50), dec!(0.012)),
        ];
        let cost = UnitCost::compute(&lines, smoothie_costs(), dec!(0.15));

        assert_eq!(cost.ingredients, dec!(2.40));
        assert_eq!(cost.overhead, dec!(0.555));
        assert_eq!(cost.total, dec!(4.255));
        assert_eq!(cost.breakdown().total, dec!(4.26));
        assert_eq!(cost.breakdown().overhead, dec!(0.56));
    }

    #[test]
    fn test_unit_cost_is_order_independent() {
        let mut lines = vec![
            line(dec!(33.3), dec!(0.0071)),
            line(dec!(12), dec!(0.0333)),
            line(dec!(7.5), dec!(0.19)),
        ];
        let forward = UnitCost::compute(&lines, smoothie_costs(), dec!(0.15));
        lines.reverse();
        let backward = UnitCost::compute(&lines, smoothie_costs(), dec!(0.15));

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_empty_ingredients_cost_only_fixed_components() {
        let cost = UnitCost::compute(&[], smoothie_costs(), dec!(0.15));
        assert_eq!(cost.ingredients, Decimal::ZERO);
        assert_eq!(cost.total, dec!(1.495));
    }

    #[test]
    fn test_margin_zero_price_has_zero_percent() {
        let margin = Margin::compute(Decimal::ZERO, dec!(4.255));
        assert_eq!(margin.amount, dec!(-4.255));
        assert_eq!(margin.percent, Decimal::ZERO);
    }

    #[test]
    fn test_margin_percent() {
        let margin = Margin::compute(dec!(8.99), dec!(4.255));
        assert_eq!(round_money(margin.amount), dec!(4.74));
        assert_eq!(round_percent(margin.percent), dec!(52.7));
    }

    #[test]
    fn test_break_even_units() {
        assert_eq!(break_even_units(dec!(5000), dec!(4.735)), 1056);
        assert_eq!(break_even_units(dec!(5000), dec!(5)), 1000);
        assert_eq!(break_even_units(dec!(5000), Decimal::ZERO), 0);
        assert_eq!(break_even_units(dec!(5000), dec!(-1.25)), 0);
    }

    #[test]
    fn test_rounding_midpoints_go_up() {
        assert_eq!(round_money(dec!(0.555)), dec!(0.56));
        assert_eq!(round_money(dec!(-0.555)), dec!(-0.55));
        assert_eq!(round_money(dec!(-0.556)), dec!(-0.56));
        assert_eq!(round_percent(dec!(52.65)), dec!(52.7));
        assert_eq!(round_percent(dec!(-12.25)), dec!(-12.2));
        assert_eq!(round_half_up(dec!(-2.5), 0), dec!(-2));
    }

    #[test]
    fn test_negative_margin_rounds_up_at_midpoint() {
        // $1.00 price over a $1.005 cost
        let margin = Margin::compute(dec!(1), dec!(1.005));
        assert_eq!(round_money(margin.amount), dec!(0));
        assert_eq!(round_percent(margin.percent), dec!(-0.5));
    }
}
