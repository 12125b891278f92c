//! Built-in demo catalog served when the real catalog is empty or unreachable.
//!
//! Demo IDs (`demo-1` to `demo-8`) are a separate namespace and always resolve.

use drizzl_core::{Cents, ProductId};

use crate::models::Product;

const DEMO_PRODUCTS: [(&str, &str, &str, &str, &str, i64, i64); 8] = [
    (
        "demo-1",
        "Green Power Smoothie",
        "green-power-smoothie",
        "Energizing blend of spinach, kale, banana, and plant protein",
        "smoothies",
        899,
        599,
    ),
    (
        "demo-2",
        "Berry Blast Bowl",
        "berry-blast-bowl",
        "Antioxidant-rich acai bowl with fresh berries and granola",
        "bowls",
        1199,
        799,
    ),
    (
        "demo-3",
        "Chocolate Protein Shake",
        "chocolate-protein-shake",
        "Rich chocolate smoothie with 25g plant protein",
        "high-protein",
        999,
        699,
    ),
    (
        "demo-4",
        "Energy Bites",
        "energy-bites",
        "No-bake energy balls with dates, nuts, and dark chocolate",
        "bites",
        699,
        449,
    ),
    (
        "demo-5",
        "Golden Turmeric Latte",
        "golden-turmeric-latte",
        "Anti-inflammatory blend with turmeric, ginger, and adaptogens",
        "wellness",
        849,
        549,
    ),
    (
        "demo-6",
        "Tropical Paradise Smoothie",
        "tropical-paradise-smoothie",
        "Mango, pineapple, and coconut milk blend",
        "smoothies",
        849,
        549,
    ),
    (
        "demo-7",
        "PB Power Bowl",
        "pb-power-bowl",
        "Peanut butter acai bowl with banana and hemp seeds",
        "bowls",
        1299,
        849,
    ),
    (
        "demo-8",
        "Vanilla Protein Dream",
        "vanilla-protein-dream",
        "Creamy vanilla shake with 30g protein",
        "high-protein",
        1049,
        749,
    ),
];

/// The eight demo products, in catalog order.
#[must_use]
pub fn demo_catalog() -> Vec<Product> {
    DEMO_PRODUCTS
        .iter()
        .map(|&(id, name, slug, description, category, price, wholesale)| Product {
            id: ProductId::new(id),
            name: name.to_string(),
            slug: slug.to_string(),
            description: Some(description.to_string()),
            category: Some(category.to_string()),
            price_cents: Cents::new(price),
            wholesale_price_cents: Cents::new(wholesale),
            is_active: true,
        })
        .collect()
}

/// Look up a demo product by ID.
#[must_use]
pub fn demo_product(id: &ProductId) -> Option<Product> {
    if !id.is_demo() {
        return None;
    }
    demo_catalog().into_iter().find(|p| &p.id == id)
}
