//! Margin report over the configured catalog.
//!
//! Runs the same list operation the admin API serves, so the report falls back
//! to demo data exactly when the API would. Without a configured database the
//! report covers the demo catalog.

use std::sync::Arc;

use tracing::{info, warn};

use drizzl_admin::config::AdminConfig;
use drizzl_admin::db::{CatalogStore, MemoryCatalogStore};
use drizzl_admin::intel::MarginEngine;
use drizzl_admin::services::ProductIntelService;

use super::{CliError, connect};

/// Log every product's unit cost and margin, followed by the suggestions.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the database connection fails.
pub async fn margins(active_only: bool) -> Result<(), CliError> {
    let config = AdminConfig::from_env()?;

    let store: Arc<dyn CatalogStore> = if config.database_url.is_some() {
        Arc::new(connect(&config).await?)
    } else {
        warn!("No database configured, reporting on the demo catalog");
        Arc::new(MemoryCatalogStore::new())
    };

    let service = ProductIntelService::new(store, MarginEngine::new(config.engine));
    let result = service.list(active_only).await;

    if let Some(note) = &result.note {
        warn!("{note}");
    }

    info!("Margin Report");
    info!("=============");
    for row in &result.data.products {
        info!(
            "  {:<28} {:<14} price ${:>6} cost ${:>6} margin ${:>6} ({}%) {:?}",
            row.product.name,
            row.product.category_label(),
            row.product.price_cents.to_dollars(),
            row.cost_per_unit,
            row.margin,
            row.margin_percent,
            row.margin_tier,
        );
    }

    info!("Suggestions:");
    for suggestion in &result.data.suggestions {
        info!("  - {suggestion}");
    }

    Ok(())
}
