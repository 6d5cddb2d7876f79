//! Products API - versioned REST catalog over an in-memory store

use axum::middleware;
use axum_helpers::server::{create_production_app, create_router, health_router, ShutdownCoordinator};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::seed;
use observability::{init_metrics, metrics_middleware, CatalogMetrics};
use tracing::info;

mod api;
mod config;
mod openapi;
mod purge;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    init_metrics()?;

    let state = AppState::new(config);

    // Seed the catalog before accepting traffic
    let report = seed::seed_catalog(&state.repository(), &state.config.seed).await?;
    CatalogMetrics::set_products_count(state.store.len().await);
    info!(
        inserted = report.inserted,
        duplicates = report.duplicates,
        "Catalog ready"
    );

    let (coordinator, _rx) = ShutdownCoordinator::new();

    // Periodically drop expired products
    let sweeper = tokio::spawn(purge::run_purge_loop(
        state.store.clone(),
        state.config.purge_interval,
        coordinator.subscribe(),
    ));

    // Build REST router
    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(
        api_routes,
        &state.config.server,
        &state.config.environment,
    )?;
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone()))
        .layer(middleware::from_fn(metrics_middleware));

    info!(
        environment = ?state.config.environment,
        "Starting Products API on port {}",
        state.config.server.port
    );

    let server_config = state.config.server.clone();
    let shutdown_timeout = state.config.shutdown_timeout;
    create_production_app(app, &server_config, coordinator, shutdown_timeout, async move {
        if let Err(e) = sweeper.await {
            tracing::warn!("Expiry sweeper ended abnormally: {}", e);
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
