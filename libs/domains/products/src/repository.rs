use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::store::ProductStore;

/// Repository trait for Product persistence
///
/// Translates store outcomes into domain errors. Implementations must make
/// `add`, `update` and `delete` atomic per id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List every live product, in no particular order
    async fn get_all(&self) -> ProductResult<Vec<Product>>;

    /// Add a new product; `Conflict` if its id is taken
    async fn add(&self, product: Product) -> ProductResult<()>;

    /// Replace an existing product; `NotFound` if its id is absent
    async fn update(&self, product: Product) -> ProductResult<()>;

    /// Delete a product by ID; `NotFound` if absent
    async fn delete(&self, id: Uuid) -> ProductResult<()>;

    /// Check if a product exists
    async fn exists(&self, id: Uuid) -> ProductResult<bool>;
}

/// Store-backed implementation of ProductRepository
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<ProductStore>,
}

impl InMemoryProductRepository {
    pub fn new(store: Arc<ProductStore>) -> Self {
        Self { store }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new(Arc::new(ProductStore::default()))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.store.get(id).await)
    }

    async fn get_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.store.get_all().await)
    }

    async fn add(&self, product: Product) -> ProductResult<()> {
        let id = product.id;
        if !self.store.try_insert(product).await {
            tracing::warn!(product_id = %id, "Refused to add product: id already exists");
            return Err(ProductError::Conflict(id));
        }

        tracing::info!(product_id = %id, "Added product");
        Ok(())
    }

    async fn update(&self, product: Product) -> ProductResult<()> {
        let id = product.id;
        if !self.store.try_update(id, product).await {
            tracing::warn!(product_id = %id, "Refused to update product: not found");
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Updated product");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<()> {
        if !self.store.try_delete(id).await {
            tracing::warn!(product_id = %id, "Refused to delete product: not found");
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> ProductResult<bool> {
        Ok(self.store.exists(id).await)
    }
}
