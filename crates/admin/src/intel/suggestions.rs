//! Portfolio-level margin advisories.

use rust_decimal::Decimal;

use crate::models::ProductWithCosts;

use super::config::SuggestionThresholds;
use super::costing::round_percent;

const ALL_HEALTHY: &str = "All products are performing within healthy margin ranges.";
const TRY_PRICE_TESTS: &str =
    "Consider A/B testing price increases on top performers to maximize revenue.";

/// Advisories for a computed portfolio, in rule order.
///
/// Falls back to a fixed pair of strings when no rule fires.
#[must_use]
pub fn generate(products: &[ProductWithCosts], thresholds: &SuggestionThresholds) -> Vec<String> {
    let mut suggestions = Vec::new();

    let low = products
        .iter()
        .filter(|p| p.margin_percent < thresholds.low_margin)
        .count();
    if low > 0 {
        suggestions.push(format!(
            "{low} products have margins below {}%. Consider reviewing ingredient costs or pricing.",
            thresholds.low_margin
        ));
    }

    let high = products
        .iter()
        .filter(|p| p.margin_percent > thresholds.high_margin)
        .count();
    if high > 0 {
        suggestions.push(format!(
            "{high} products have excellent margins (>{}%). Consider increasing marketing spend on these SKUs.",
            thresholds.high_margin
        ));
    }

    for (category, margins) in group_by_category(products) {
        let count = Decimal::from(margins.len());
        let average = margins.iter().sum::<Decimal>() / count;
        if average < thresholds.category_average {
            suggestions.push(format!(
                "{} category has low average margin ({:.1}%). Review supplier contracts.",
                capitalize(category),
                round_percent(average)
            ));
        }
    }

    if suggestions.is_empty() {
        suggestions.push(ALL_HEALTHY.to_string());
        suggestions.push(TRY_PRICE_TESTS.to_string());
    }

    suggestions
}

/// Margin percentages grouped by category label, in first-seen order.
fn group_by_category(products: &[ProductWithCosts]) -> Vec<(&str, Vec<Decimal>)> {
    let mut groups: Vec<(&str, Vec<Decimal>)> = Vec::new();
    for product in products {
        let label = product.product.category_label();
        match groups.iter_mut().find(|(c, _)| *c == label) {
            Some((_, margins)) => margins.push(product.margin_percent),
            None => groups.push((label, vec![product.margin_percent])),
        }
    }
    groups
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
