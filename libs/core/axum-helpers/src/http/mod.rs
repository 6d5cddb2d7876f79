//! HTTP middleware module.
//!
//! - CORS configuration
//! - Security headers
//! - API version negotiation
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{create_cors_layer, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_cors_layer(&origins)?);
//! ```

pub mod cors;
pub mod security;
pub mod versioning;

pub use cors::{create_cors_layer, create_permissive_cors_layer};
pub use security::security_headers;
pub use versioning::{ApiVersions, api_version};
