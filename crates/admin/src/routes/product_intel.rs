//! Product intelligence API handlers.

use std::cmp::Ordering;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use drizzl_core::ProductId;

use crate::{
    error::AppError,
    models::{CostOverrideInput, ProductCost, ProductDetails, ProductWithCosts},
    state::AppState,
};

// =============================================================================
// Query Parameters
// =============================================================================

/// Query parameters for the product list with filtering and sorting.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    /// Only include active products.
    #[serde(default)]
    pub active_only: bool,
    /// Case-insensitive match on name or slug.
    pub search: Option<String>,
    /// Exact category label (`all` disables the filter).
    pub category: Option<String>,
    /// Sort column key.
    pub sort: Option<String>,
    /// Sort direction (asc/desc).
    pub direction: Option<String>,
}

/// Sortable columns of the product table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Name,
    #[default]
    MarginPercent,
    CostPerUnit,
    PriceCents,
}

impl SortField {
    /// Parse a sort key, falling back to margin percent.
    #[must_use]
    pub fn parse(key: Option<&str>) -> Self {
        match key {
            Some("name") => Self::Name,
            Some("cost_per_unit") => Self::CostPerUnit,
            Some("price_cents") => Self::PriceCents,
            _ => Self::MarginPercent,
        }
    }

    /// Default direction: alphabetical for names, largest first otherwise.
    const fn default_descending(self) -> bool {
        !matches!(self, Self::Name)
    }

    fn compare(self, a: &ProductWithCosts, b: &ProductWithCosts) -> Ordering {
        match self {
            Self::Name => a.product.name.cmp(&b.product.name),
            Self::MarginPercent => a.margin_percent.cmp(&b.margin_percent),
            Self::CostPerUnit => a.cost_per_unit.cmp(&b.cost_per_unit),
            Self::PriceCents => a.product.price_cents.cmp(&b.product.price_cents),
        }
    }
}

impl ProductListQuery {
    fn matches(&self, row: &ProductWithCosts) -> bool {
        let category_ok = match self.category.as_deref() {
            None | Some("" | "all") => true,
            Some(category) => row.product.category_label() == category,
        };

        let search_ok = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .is_none_or(|search| {
                let needle = search.to_lowercase();
                row.product.name.to_lowercase().contains(&needle)
                    || row.product.slug.to_lowercase().contains(&needle)
            });

        category_ok && search_ok
    }

    fn sort(&self, rows: &mut [ProductWithCosts]) {
        let field = SortField::parse(self.sort.as_deref());
        let descending = match self.direction.as_deref() {
            Some("asc") => false,
            Some("desc") => true,
            _ => field.default_descending(),
        };

        rows.sort_by(|a, b| {
            let ordering = field.compare(a, b);
            if descending { ordering.reverse() } else { ordering }
        });
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Product list with portfolio advisories.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductWithCosts>,
    pub suggestions: Vec<String>,
    /// Distinct category labels across the portfolio, in first-seen order.
    pub categories: Vec<String>,
    #[serde(rename = "demoMode")]
    pub demo_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Full breakdown for one product.
#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    pub product: ProductDetails,
    #[serde(rename = "demoMode")]
    pub demo_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outcome of a cost override.
#[derive(Debug, Serialize)]
pub struct CostOverrideResponse {
    pub success: bool,
    #[serde(rename = "demoMode")]
    pub demo_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<ProductCost>,
}

fn distinct_categories(rows: &[ProductWithCosts]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for row in rows {
        let label = row.product.category_label();
        if !categories.iter().any(|c| c == label) {
            categories.push(label.to_string());
        }
    }
    categories
}

// =============================================================================
// Handlers
// =============================================================================

/// List products with costs, margins and suggestions.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Json<ProductListResponse> {
    let result = state.product_intel().list(query.active_only).await;
    let demo_mode = result.is_demo();
    let portfolio = result.data;

    let categories = distinct_categories(&portfolio.products);
    let mut products: Vec<ProductWithCosts> = portfolio
        .products
        .into_iter()
        .filter(|row| query.matches(row))
        .collect();
    query.sort(&mut products);

    Json(ProductListResponse {
        products,
        suggestions: portfolio.suggestions,
        categories,
        demo_mode,
        message: result.note,
    })
}

/// Full breakdown for one product.
///
/// # Errors
///
/// Returns 404 if the product resolves in neither the catalog nor the demo catalog.
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetailResponse>, AppError> {
    let result = state.product_intel().detail(&ProductId::new(id)).await?;

    Ok(Json(ProductDetailResponse {
        demo_mode: result.is_demo(),
        product: result.data,
        message: result.note,
    }))
}

/// Override a product's unit costs.
///
/// # Errors
///
/// Returns 400 if any amount is negative.
#[instrument(skip(state, input))]
pub async fn update_cost(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CostOverrideInput>,
) -> Result<Json<CostOverrideResponse>, AppError> {
    let result = state
        .product_intel()
        .override_cost(&ProductId::new(id), input)
        .await?;

    Ok(Json(CostOverrideResponse {
        success: true,
        demo_mode: result.is_demo(),
        message: result.note,
        cost: result.data,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use drizzl_core::Cents;

    use crate::intel::MarginEngine;
    use crate::intel::demo::demo_catalog;

    fn rows() -> Vec<ProductWithCosts> {
        let engine = MarginEngine::default();
        demo_catalog()
            .into_iter()
            .map(|p| engine.with_costs(p))
            .collect()
    }

    fn names(rows: &[ProductWithCosts]) -> Vec<&str> {
        rows.iter().map(|r| r.product.name.as_str()).collect()
    }

    #[test]
    fn test_sort_field_parse() {
        assert_eq!(SortField::parse(Some("name")), SortField::Name);
        assert_eq!(SortField::parse(Some("price_cents")), SortField::PriceCents);
        assert_eq!(SortField::parse(Some("bogus")), SortField::MarginPercent);
        assert_eq!(SortField::parse(None), SortField::MarginPercent);
    }

    #[test]
    fn test_default_sort_is_margin_descending() {
        let mut rows = rows();
        ProductListQuery::default().sort(&mut rows);
        assert!(
            rows.windows(2)
                .all(|w| matches!(w, [a, b] if a.margin_percent >= b.margin_percent))
        );
    }

    #[test]
    fn test_name_sort_defaults_to_ascending() {
        let mut rows = rows();
        let query = ProductListQuery {
            sort: Some("name".to_string()),
            ..ProductListQuery::default()
        };
        query.sort(&mut rows);
        assert_eq!(names(&rows).first(), Some(&"Berry Blast Bowl"));
        assert_eq!(names(&rows).last(), Some(&"Vanilla Protein Dream"));
    }

    #[test]
    fn test_price_sort_ascending() {
        let mut rows = rows();
        let query = ProductListQuery {
            sort: Some("price_cents".to_string()),
            direction: Some("asc".to_string()),
            ..ProductListQuery::default()
        };
        query.sort(&mut rows);
        assert_eq!(rows.first().map(|r| r.product.price_cents), Some(Cents::new(699)));
        assert_eq!(rows.last().map(|r| r.product.price_cents), Some(Cents::new(1299)));
    }

    #[test]
    fn test_search_matches_name_and_slug() {
        let query = ProductListQuery {
            search: Some("PROTEIN".to_string()),
            ..ProductListQuery::default()
        };
        let matched: Vec<_> = rows().into_iter().filter(|r| query.matches(r)).collect();
        assert_eq!(
            names(&matched),
            ["Chocolate Protein Shake", "Vanilla Protein Dream"]
        );

        let query = ProductListQuery {
            search: Some("pb-power".to_string()),
            ..ProductListQuery::default()
        };
        assert_eq!(rows().iter().filter(|r| query.matches(r)).count(), 1);
    }

    #[test]
    fn test_category_filter() {
        let query = ProductListQuery {
            category: Some("bowls".to_string()),
            ..ProductListQuery::default()
        };
        assert_eq!(rows().iter().filter(|r| query.matches(r)).count(), 2);

        let query = ProductListQuery {
            category: Some("all".to_string()),
            ..ProductListQuery::default()
        };
        assert_eq!(rows().iter().filter(|r| query.matches(r)).count(), 8);
    }

    #[test]
    fn test_distinct_categories_first_seen() {
        assert_eq!(
            distinct_categories(&rows()),
            ["smoothies", "bowls", "high-protein", "bites", "wellness"]
        );
    }

    #[test]
    fn test_cost_override_response_shape() {
        let response = CostOverrideResponse {
            success: true,
            demo_mode: true,
            message: Some("Demo mode - changes not persisted".to_string()),
            cost: None,
        };
        let json = serde_json::to_value(&response).unwrap_or_default();
        assert_eq!(json["success"], true);
        assert_eq!(json["demoMode"], true);
        assert!(json.get("cost").is_none());
        assert!(json.get("demo_mode").is_none());
    }

    #[test]
    fn test_margin_percent_serializes_as_number() {
        let row = rows().into_iter().next();
        let json = row
            .map(|r| serde_json::to_value(&r).unwrap_or_default())
            .unwrap_or_default();
        let margin_percent = json["margin_percent"].as_f64().unwrap_or_default();
        assert!((margin_percent - 52.7).abs() < 1e-9);
        assert_eq!(json["price_cents"], 899);
        assert_eq!(json["margin_tier"], "healthy");
    }
}
