//! API routes module

pub mod health;
pub mod products;

use axum::{middleware, Router};
use axum_helpers::{api_version, ApiVersions};

use crate::state::AppState;

/// Versions this service answers for.
pub const API_VERSIONS: ApiVersions = ApiVersions::new(&["1.0"]);

/// Create all versioned API routes (mounted under `/api` by `create_router`)
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/v1/products", products::router(state))
        .layer(middleware::from_fn_with_state(API_VERSIONS, api_version))
}
