//! Application state management

use domain_products::{InMemoryProductRepository, ProductService, ProductStore};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub store: Arc<ProductStore>,
    pub service: ProductService<InMemoryProductRepository>,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Self {
        let store = Arc::new(ProductStore::new(config.store.clone()));
        let repository = InMemoryProductRepository::new(Arc::clone(&store));

        Self {
            config,
            store,
            service: ProductService::new(repository),
        }
    }

    /// The repository the service writes through, for seeding.
    pub fn repository(&self) -> InMemoryProductRepository {
        InMemoryProductRepository::new(Arc::clone(&self.store))
    }
}
