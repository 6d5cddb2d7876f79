//! Products Domain
//!
//! Product catalog backed by a sharded, concurrency-safe in-memory store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, business rules, DTO projection
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Domain errors over the store (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Store    │  ← Sharded RwLock map with optional expiry
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_products::{
//!     handlers, seed, InMemoryProductRepository, ProductService, ProductStore, StoreConfig,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(ProductStore::new(StoreConfig::default()));
//! let repository = InMemoryProductRepository::new(Arc::clone(&store));
//!
//! seed::seed_catalog(&repository, &seed::SeedConfig::default()).await?;
//!
//! let service = ProductService::new(repository);
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod seed;
pub mod service;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{CreateProduct, Product, ProductDto, UpdateProduct, UpdateProductRequest};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
pub use store::{ProductStore, StoreConfig};
