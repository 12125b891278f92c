//! Per-serving nutrition totals.

use rust_decimal::Decimal;

use super::costing::round_half_up;
use crate::models::{Ingredient, NutritionData, NutritionTotals};

/// Sum nutrition facts across an ingredient list.
#[must_use]
pub fn aggregate(ingredients: &[Ingredient]) -> NutritionTotals {
    ingredients
        .iter()
        .map(|i| i.nutrition_data)
        .fold(NutritionTotals::default(), NutritionTotals::add)
}

impl NutritionTotals {
    fn add(self, data: NutritionData) -> Self {
        Self {
            calories: self.calories + data.calories,
            protein: self.protein + data.protein,
            carbs: self.carbs + data.carbs,
            fat: self.fat + data.fat,
            fiber: self.fiber + data.fiber,
            sugar: self.sugar + data.sugar,
        }
    }

    /// Display rounding: whole calories, everything else to one decimal.
    #[must_use]
    pub fn rounded(self) -> Self {
        let one_dp = |v: Decimal| round_half_up(v, 1);
        Self {
            calories: round_half_up(self.calories, 0),
            protein: one_dp(self.protein),
            carbs: one_dp(self.carbs),
            fat: one_dp(self.fat),
            fiber: one_dp(self.fiber),
            sugar: one_dp(self.sugar),
        }
    }
}
