//! Product Service - Business logic layer

use observability::{CatalogMetrics, Outcome};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductDto, UpdateProduct};
use crate::repository::ProductRepository;

fn outcome_of<T>(result: &ProductResult<T>) -> Outcome {
    match result {
        Ok(_) => Outcome::Success,
        Err(ProductError::Validation(_)) => Outcome::Invalid,
        Err(ProductError::Conflict(_)) => Outcome::Conflict,
        Err(ProductError::NotFound(_)) => Outcome::NotFound,
        Err(ProductError::Internal(_)) => Outcome::Error,
    }
}

fn validate<T: Validate>(input: &T) -> ProductResult<()> {
    input
        .validate()
        .map_err(|e| ProductError::Validation(axum_helpers::field_errors(&e)))
}

/// Product service providing business logic operations
///
/// Validation always runs before any repository call, so a rejected request
/// never touches the store. Results are projected to [`ProductDto`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: Uuid) -> ProductResult<Option<ProductDto>> {
        let started = Instant::now();
        let result = self.repository.get_by_id(id).await;

        let outcome = match &result {
            Ok(None) => Outcome::NotFound,
            other => outcome_of(other),
        };
        CatalogMetrics::record_operation("get", outcome, started.elapsed());

        Ok(result?.map(ProductDto::from))
    }

    /// List all products
    #[instrument(skip(self))]
    pub async fn get_all_products(&self) -> ProductResult<Vec<ProductDto>> {
        let started = Instant::now();
        let result = self.repository.get_all().await;
        CatalogMetrics::record_operation("list", outcome_of(&result), started.elapsed());

        let products = result?;
        tracing::debug!(count = products.len(), "Listed products");
        Ok(products.into_iter().map(ProductDto::from).collect())
    }

    /// Create a new product under a freshly generated id
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<ProductDto> {
        let started = Instant::now();
        let result = self.try_create(input).await;
        CatalogMetrics::record_operation("create", outcome_of(&result), started.elapsed());
        result
    }

    async fn try_create(&self, input: CreateProduct) -> ProductResult<ProductDto> {
        validate(&input)?;

        let product = Product::new(Uuid::new_v4(), input);
        self.repository.add(product.clone()).await?;

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product.into())
    }

    /// Replace an existing product; the id is preserved
    #[instrument(skip(self, command), fields(product_id = %command.id))]
    pub async fn update_product(&self, command: UpdateProduct) -> ProductResult<ProductDto> {
        let started = Instant::now();
        let result = self.try_update(command).await;
        CatalogMetrics::record_operation("update", outcome_of(&result), started.elapsed());
        result
    }

    async fn try_update(&self, command: UpdateProduct) -> ProductResult<ProductDto> {
        validate(&command)?;

        if self.repository.get_by_id(command.id).await?.is_none() {
            return Err(ProductError::NotFound(command.id));
        }

        let product = command.into_product();
        self.repository.update(product.clone()).await?;

        tracing::info!(product_id = %product.id, "Updated product");
        Ok(product.into())
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        let started = Instant::now();
        let result = self.try_delete(id).await;
        CatalogMetrics::record_operation("delete", outcome_of(&result), started.elapsed());
        result
    }

    async fn try_delete(&self, id: Uuid) -> ProductResult<()> {
        if self.repository.get_by_id(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        self.repository.delete(id).await?;
        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }
}
