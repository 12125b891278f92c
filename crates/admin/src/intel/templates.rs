//! Per-category ingredient templates used when a product has no recorded recipe.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use drizzl_core::{Category, IngredientId, ProductId};

use crate::models::{Ingredient, NutritionData};

/// One line of a category's stand-in recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientTemplate {
    /// Stable template number, appended to the product ID for line IDs.
    pub template_id: u8,
    pub name: &'static str,
    pub weight_grams: Decimal,
    pub cost_per_gram: Decimal,
    pub nutrition: NutritionData,
    pub supplier: &'static str,
}

impl IngredientTemplate {
    /// Instantiate this template as an ingredient line of `product_id`.
    #[must_use]
    pub fn instantiate(&self, product_id: &ProductId) -> Ingredient {
        Ingredient {
            id: IngredientId::new(format!("{product_id}-{}", self.template_id)),
            product_id: product_id.clone(),
            ingredient_name: self.name.to_string(),
            weight_grams: self.weight_grams,
            cost_per_gram: self.cost_per_gram,
            nutrition_data: self.nutrition,
            supplier: Some(self.supplier.to_string()),
        }
    }
}

macro_rules! template {
    (
        $id:tt, $name:tt, $grams:tt, $per_gram:tt,
        [$cal:tt, $protein:tt, $carbs:tt, $fat:tt, $fiber:tt, $sugar:tt],
        $supplier:tt
    ) => {
        IngredientTemplate {
            template_id: $id,
            name: $name,
            weight_grams: dec!($grams),
            cost_per_gram: dec!($per_gram),
            nutrition: NutritionData {
                calories: dec!($cal),
                protein: dec!($protein),
                carbs: dec!($carbs),
                fat: dec!($fat),
                fiber: dec!($fiber),
                sugar: dec!($sugar),
            },
            supplier: $supplier,
        }
    };
}

/// The five-ingredient recipe for a category.
#[must_use]
pub fn templates_for(category: Category) -> [IngredientTemplate; 5] {
    match category {
        Category::Smoothies => [
            template!(1, "Organic Bananas", 80, 0.003, [71, 0.9, 18, 0.3, 2, 12], "Dole Organics"),
            template!(2, "Organic Spinach", 40, 0.008, [9, 1.1, 1.4, 0.2, 0.9, 0.2], "Earthbound Farms"),
            template!(3, "Almond Milk", 120, 0.002, [18, 0.6, 0.8, 1.4, 0, 0], "Califia Farms"),
            template!(4, "Plant Protein Blend", 25, 0.04, [100, 20, 3, 1.5, 1, 0], "Sunwarrior"),
            template!(5, "Organic Blueberries", 50, 0.012, [29, 0.4, 7, 0.2, 1.2, 5], "Driscoll's Organic"),
        ],
        Category::Bowls => [
            template!(6, "Organic Acai Puree", 100, 0.025, [70, 1, 6, 5, 3, 2], "Sambazon"),
            template!(7, "Organic Granola", 40, 0.015, [180, 4, 28, 7, 3, 8], "Nature's Path"),
            template!(8, "Fresh Strawberries", 60, 0.008, [19, 0.4, 4.6, 0.2, 1.2, 2.9], "Cal-Giant"),
            template!(9, "Coconut Flakes", 15, 0.02, [100, 1, 4, 9, 2.5, 1.5], "Bob's Red Mill"),
            template!(10, "Raw Honey", 15, 0.035, [46, 0, 12.5, 0, 0, 12.5], "Local Bee Farm"),
        ],
        Category::HighProtein => [
            template!(11, "Pea Protein Isolate", 35, 0.035, [120, 27, 1, 0.5, 0.5, 0], "PURIS"),
            template!(12, "Hemp Seeds", 20, 0.045, [110, 6.3, 1.7, 9.8, 0.8, 0.3], "Manitoba Harvest"),
            template!(13, "Cacao Powder", 15, 0.03, [20, 1, 3, 0.8, 2, 0], "Navitas Organics"),
            template!(14, "Organic Oat Milk", 150, 0.0025, [60, 1.5, 8, 2.5, 1, 3.5], "Oatly"),
            template!(15, "Almond Butter", 25, 0.022, [163, 5.3, 5.5, 14, 2.5, 1.4], "Justin's"),
        ],
        Category::Bites => [
            template!(16, "Medjool Dates", 40, 0.018, [111, 0.7, 30, 0, 2.7, 27], "Natural Delights"),
            template!(17, "Cashews", 30, 0.025, [157, 5.2, 8.6, 12.4, 0.9, 1.7], "Terrafresh"),
            template!(18, "Dark Chocolate Chips", 15, 0.028, [80, 0.9, 9, 4.8, 1.1, 6.8], "Guittard"),
            template!(19, "Chia Seeds", 10, 0.032, [49, 1.6, 4.2, 3.1, 3.4, 0], "Spectrum"),
            template!(20, "Vanilla Extract", 2, 0.15, [6, 0, 0.3, 0, 0, 0.3], "Nielsen-Massey"),
        ],
        Category::Wellness => [
            template!(21, "Turmeric Powder", 5, 0.06, [15, 0.4, 3.2, 0.15, 1, 0.16], "Simply Organic"),
            template!(22, "Ginger Root", 8, 0.02, [6, 0.1, 1.4, 0.06, 0.16, 0.14], "Frontier Co-op"),
            template!(23, "Lion's Mane Powder", 3, 0.25, [10, 0.6, 2, 0.1, 0.5, 0], "Four Sigmatic"),
            template!(24, "Ashwagandha Extract", 2, 0.35, [5, 0.2, 1, 0, 0.2, 0], "Gaia Herbs"),
            template!(25, "MCT Oil", 10, 0.04, [90, 0, 0, 10, 0, 0], "Bulletproof"),
        ],
    }
}
