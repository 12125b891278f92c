//! Cost tables and thresholds owned by the margin engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use drizzl_core::Category;

/// Per-unit packaging and labor cost for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCosts {
    pub packaging: Decimal,
    pub labor: Decimal,
}

/// Thresholds for portfolio advisories, in margin percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionThresholds {
    /// Products strictly below this are flagged as low margin.
    pub low_margin: Decimal,
    /// Products strictly above this are flagged as high performers.
    pub high_margin: Decimal,
    /// Categories whose average is strictly below this are flagged.
    pub category_average: Decimal,
}

impl Default for SuggestionThresholds {
    fn default() -> Self {
        Self {
            low_margin: dec!(30),
            high_margin: dec!(60),
            category_average: dec!(35),
        }
    }
}

/// Packaging and labor costs for every known category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostTable {
    pub smoothies: CategoryCosts,
    pub bowls: CategoryCosts,
    pub high_protein: CategoryCosts,
    pub bites: CategoryCosts,
    pub wellness: CategoryCosts,
}

impl CostTable {
    /// Costs for a category.
    ///
    /// Labels outside the table resolve to smoothies before reaching here.
    #[must_use]
    pub const fn get(&self, category: Category) -> CategoryCosts {
        match category {
            Category::Smoothies => self.smoothies,
            Category::Bowls => self.bowls,
            Category::HighProtein => self.high_protein,
            Category::Bites => self.bites,
            Category::Wellness => self.wellness,
        }
    }
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            smoothies: CategoryCosts {
                packaging: dec!(0.85),
                labor: dec!(0.45),
            },
            bowls: CategoryCosts {
                packaging: dec!(1.25),
                labor: dec!(0.65),
            },
            high_protein: CategoryCosts {
                packaging: dec!(0.95),
                labor: dec!(0.55),
            },
            bites: CategoryCosts {
                packaging: dec!(0.65),
                labor: dec!(0.35),
            },
            wellness: CategoryCosts {
                packaging: dec!(0.75),
                labor: dec!(0.40),
            },
        }
    }
}

/// Immutable configuration for [`super::MarginEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Share of (ingredients + packaging + labor) added as overhead.
    pub overhead_rate: Decimal,
    /// Fixed monthly costs, in dollars, used for break-even.
    pub fixed_monthly_costs: Decimal,
    pub costs: CostTable,
    pub thresholds: SuggestionThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overhead_rate: dec!(0.15),
            fixed_monthly_costs: dec!(5000),
            costs: CostTable::default(),
            thresholds: SuggestionThresholds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.overhead_rate, dec!(0.15));
        assert_eq!(config.fixed_monthly_costs, dec!(5000));
        assert_eq!(config.thresholds.low_margin, dec!(30));
        assert_eq!(config.thresholds.high_margin, dec!(60));
        assert_eq!(config.thresholds.category_average, dec!(35));
    }

    #[test]
    fn test_category_costs_table() {
        let config = EngineConfig::default();
        let bowls = config.costs.get(Category::Bowls);
        assert_eq!(bowls.packaging, dec!(1.25));
        assert_eq!(bowls.labor, dec!(0.65));

        let smoothies = config.costs.get(Category::Smoothies);
        assert_eq!(smoothies.packaging, dec!(0.85));
        assert_eq!(smoothies.labor, dec!(0.45));
    }
}
