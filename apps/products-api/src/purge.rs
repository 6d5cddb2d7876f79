//! Background sweep of expired products.

use domain_products::ProductStore;
use observability::CatalogMetrics;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

/// Purge expired entries every `period` until `shutdown` fires.
///
/// Also refreshes the live-products gauge on every tick.
pub async fn run_purge_loop(
    store: Arc<ProductStore>,
    period: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    info!(?period, ttl = ?store.ttl(), "Expiry sweeper started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let purged = store.purge_expired().await;
                if purged > 0 {
                    info!(purged, "Purged expired products");
                    CatalogMetrics::record_purged(purged);
                } else {
                    debug!("No expired products to purge");
                }
                CatalogMetrics::set_products_count(store.len().await);
            }
            _ = shutdown.recv() => {
                info!("Expiry sweeper stopping");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_products::{Product, StoreConfig};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_purges_and_stops_on_shutdown() {
        let store = Arc::new(ProductStore::new(StoreConfig {
            shards: 2,
            ttl: Some(Duration::from_secs(5)),
        }));
        store
            .try_insert(Product {
                id: Uuid::new_v4(),
                name: "Ephemeral".to_string(),
                description: String::new(),
                price: Decimal::ONE,
            })
            .await;

        let (tx, rx) = broadcast::channel(1);
        let handle = tokio::spawn(run_purge_loop(
            Arc::clone(&store),
            Duration::from_secs(10),
            rx,
        ));

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert!(store.is_empty().await);

        tx.send(()).unwrap();
        handle.await.unwrap();
    }
}
