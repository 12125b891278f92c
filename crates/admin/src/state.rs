//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::CatalogStore;
use crate::intel::MarginEngine;
use crate::services::ProductIntelService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn CatalogStore>,
    product_intel: ProductIntelService,
}

impl AppState {
    /// Build state over a catalog store and margin engine.
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>, engine: MarginEngine) -> Self {
        let product_intel = ProductIntelService::new(Arc::clone(&store), engine);
        Self {
            inner: Arc::new(AppStateInner {
                store,
                product_intel,
            }),
        }
    }

    /// The catalog store.
    #[must_use]
    pub fn store(&self) -> &dyn CatalogStore {
        self.inner.store.as_ref()
    }

    /// The product intelligence service.
    #[must_use]
    pub fn product_intel(&self) -> &ProductIntelService {
        &self.inner.product_intel
    }
}
