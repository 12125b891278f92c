//! Business logic services for admin.
//!
//! # Services
//!
//! - `product_intel` - Product intelligence: margins, detail breakdowns and cost overrides

pub mod product_intel;

pub use product_intel::{IntelError, Portfolio, ProductIntelService};
