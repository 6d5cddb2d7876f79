//! Sharded in-memory product store.
//!
//! Products are spread over a fixed number of shards by id. Each shard has its
//! own `tokio::sync::RwLock`, so mutations on different shards never contend,
//! and every operation holds at most one shard lock at a time. Every
//! check-then-write happens under a single write guard with no `.await`
//! in between, so a cancelled caller cannot leave a half-applied mutation.
//!
//! Entries may carry an expiry deadline. An expired entry is treated as
//! absent by every operation and is dropped lazily when a mutation touches it
//! or eagerly by [`ProductStore::purge_expired`].

use core_config::{ConfigError, FromEnv, env_parse_or};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use crate::models::Product;

pub const DEFAULT_SHARDS: usize = 16;
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Store sizing and expiry policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of independently locked shards (at least 1)
    pub shards: usize,
    /// Time-to-live measured from the last insert or update; `None` disables expiry
    pub ttl: Option<Duration>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            shards: DEFAULT_SHARDS,
            ttl: Some(DEFAULT_TTL),
        }
    }
}

impl FromEnv for StoreConfig {
    /// - STORE_SHARDS: defaults to 16, must be positive
    /// - STORE_TTL_SECS: defaults to 3600, `0` disables expiry, must fit the clock
    fn from_env() -> Result<Self, ConfigError> {
        let shards: usize = env_parse_or("STORE_SHARDS", DEFAULT_SHARDS)?;
        if shards == 0 {
            return Err(ConfigError::InvalidValue {
                key: "STORE_SHARDS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        let ttl_secs: u64 = env_parse_or("STORE_TTL_SECS", DEFAULT_TTL.as_secs())?;
        let ttl = (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs));
        if ttl.is_some_and(|ttl| Instant::now().checked_add(ttl).is_none()) {
            return Err(ConfigError::InvalidValue {
                key: "STORE_TTL_SECS".to_string(),
                details: format!("{} seconds is beyond the clock's range", ttl_secs),
            });
        }

        Ok(Self { shards, ttl })
    }
}

#[derive(Debug, Clone)]
struct StoredProduct {
    product: Product,
    expires_at: Option<Instant>,
}

impl StoredProduct {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| now < deadline)
    }
}

type Shard = RwLock<HashMap<Uuid, StoredProduct>>;

/// Concurrency-safe keyed container of products.
#[derive(Debug)]
pub struct ProductStore {
    shards: Box<[Shard]>,
    ttl: Option<Duration>,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl ProductStore {
    pub fn new(config: StoreConfig) -> Self {
        let shards = (0..config.shards.max(1))
            .map(|_| RwLock::new(HashMap::new()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            shards,
            ttl: config.ttl,
        }
    }

    /// A store whose entries never expire.
    pub fn without_expiry() -> Self {
        Self::new(StoreConfig {
            ttl: None,
            ..StoreConfig::default()
        })
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    fn shard(&self, id: &Uuid) -> &Shard {
        let (hi, lo) = id.as_u64_pair();
        let index = ((hi ^ lo) % self.shards.len() as u64) as usize;
        &self.shards[index]
    }

    fn stored(&self, product: Product, now: Instant) -> StoredProduct {
        StoredProduct {
            product,
            // A deadline past the clock's range never arrives.
            expires_at: self.ttl.and_then(|ttl| now.checked_add(ttl)),
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<Product> {
        let now = Instant::now();
        let shard = self.shard(&id).read().await;
        shard
            .get(&id)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.product.clone())
    }

    /// Snapshot of every live product. Shards are read one after another,
    /// so the result is not a single point-in-time view across shards.
    pub async fn get_all(&self) -> Vec<Product> {
        let now = Instant::now();
        let mut products = Vec::new();
        for shard in self.shards.iter() {
            let shard = shard.read().await;
            products.extend(
                shard
                    .values()
                    .filter(|entry| entry.is_live(now))
                    .map(|entry| entry.product.clone()),
            );
        }
        products
    }

    /// Insert `product` unless a live entry with its id exists.
    pub async fn try_insert(&self, product: Product) -> bool {
        let now = Instant::now();
        let id = product.id;
        let mut shard = self.shard(&id).write().await;
        match shard.entry(id) {
            Entry::Occupied(entry) if entry.get().is_live(now) => false,
            Entry::Occupied(mut entry) => {
                entry.insert(self.stored(product, now));
                true
            }
            Entry::Vacant(entry) => {
                entry.insert(self.stored(product, now));
                true
            }
        }
    }

    /// Replace the live entry stored under `id`, refreshing its expiry.
    pub async fn try_update(&self, id: Uuid, product: Product) -> bool {
        let now = Instant::now();
        let mut shard = self.shard(&id).write().await;
        match shard.entry(id) {
            Entry::Occupied(mut entry) if entry.get().is_live(now) => {
                entry.insert(self.stored(product, now));
                true
            }
            Entry::Occupied(entry) => {
                entry.remove();
                false
            }
            Entry::Vacant(_) => false,
        }
    }

    /// Remove the live entry stored under `id`.
    pub async fn try_delete(&self, id: Uuid) -> bool {
        let now = Instant::now();
        let mut shard = self.shard(&id).write().await;
        match shard.remove(&id) {
            Some(entry) => entry.is_live(now),
            None => false,
        }
    }

    pub async fn exists(&self, id: Uuid) -> bool {
        let now = Instant::now();
        let shard = self.shard(&id).read().await;
        shard.get(&id).is_some_and(|entry| entry.is_live(now))
    }

    /// Number of live products.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let mut count = 0;
        for shard in self.shards.iter() {
            let shard = shard.read().await;
            count += shard.values().filter(|entry| entry.is_live(now)).count();
        }
        count
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every expired entry and return how many were removed.
    pub async fn purge_expired(&self) -> usize {
        if self.ttl.is_none() {
            return 0;
        }

        let now = Instant::now();
        let mut purged = 0;
        for shard in self.shards.iter() {
            let mut shard = shard.write().await;
            let before = shard.len();
            shard.retain(|_, entry| entry.is_live(now));
            purged += before - shard.len();
        }
        purged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn product(name: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            price: Decimal::new(999, 2),
        }
    }

    fn ttl_store(ttl: Duration) -> ProductStore {
        ProductStore::new(StoreConfig {
            shards: 4,
            ttl: Some(ttl),
        })
    }

    #[tokio::test]
    async fn test_insert_get_and_exists() {
        let store = ProductStore::without_expiry();
        let widget = product("Widget");

        assert!(store.try_insert(widget.clone()).await);
        assert_eq!(store.get(widget.id).await, Some(widget.clone()));
        assert!(store.exists(widget.id).await);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_refuses_live_duplicate() {
        let store = ProductStore::without_expiry();
        let original = product("Original");
        let mut impostor = product("Impostor");
        impostor.id = original.id;

        assert!(store.try_insert(original.clone()).await);
        assert!(!store.try_insert(impostor).await);
        assert_eq!(store.get(original.id).await, Some(original));
    }

    #[tokio::test]
    async fn test_update_and_delete_require_presence() {
        let store = ProductStore::without_expiry();
        let widget = product("Widget");

        assert!(!store.try_update(widget.id, widget.clone()).await);
        assert!(!store.try_delete(widget.id).await);
        assert!(store.is_empty().await);

        store.try_insert(widget.clone()).await;
        let mut renamed = widget.clone();
        renamed.name = "Widget2".to_string();
        assert!(store.try_update(widget.id, renamed.clone()).await);
        assert_eq!(store.get(widget.id).await, Some(renamed));

        assert!(store.try_delete(widget.id).await);
        assert!(!store.try_delete(widget.id).await);
        assert_eq!(store.get(widget.id).await, None);
    }

    #[tokio::test]
    async fn test_get_all_spans_shards() {
        let store = ProductStore::new(StoreConfig {
            shards: 3,
            ttl: None,
        });
        for i in 0..20 {
            assert!(store.try_insert(product(&format!("p{i}"))).await);
        }
        assert_eq!(store.get_all().await.len(), 20);
    }

    #[tokio::test]
    async fn test_zero_shards_is_clamped() {
        let store = ProductStore::new(StoreConfig {
            shards: 0,
            ttl: None,
        });
        assert!(store.try_insert(product("Solo")).await);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_absent_and_replaceable() {
        let store = ttl_store(Duration::from_secs(60));
        let widget = product("Widget");
        store.try_insert(widget.clone()).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(store.exists(widget.id).await);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!store.exists(widget.id).await);
        assert_eq!(store.get(widget.id).await, None);
        assert!(store.get_all().await.is_empty());

        let mut replacement = product("Replacement");
        replacement.id = widget.id;
        assert!(store.try_insert(replacement.clone()).await);
        assert_eq!(store.get(widget.id).await, Some(replacement));
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_refreshes_expiry() {
        let store = ttl_store(Duration::from_secs(60));
        let widget = product("Widget");
        store.try_insert(widget.clone()).await;

        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(store.try_update(widget.id, widget.clone()).await);

        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(store.exists(widget.id).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_and_delete_fail_on_expired_entry() {
        let store = ttl_store(Duration::from_secs(10));
        let widget = product("Widget");
        store.try_insert(widget.clone()).await;

        tokio::time::advance(Duration::from_secs(11)).await;
        assert!(!store.try_update(widget.id, widget.clone()).await);
        assert!(!store.try_delete(widget.id).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired_counts_removed_entries() {
        let store = ttl_store(Duration::from_secs(10));
        store.try_insert(product("old-1")).await;
        store.try_insert(product("old-2")).await;

        tokio::time::advance(Duration::from_secs(5)).await;
        let fresh = product("fresh");
        store.try_insert(fresh.clone()).await;

        tokio::time::advance(Duration::from_secs(6)).await;
        assert_eq!(store.purge_expired().await, 2);
        assert_eq!(store.purge_expired().await, 0);
        assert_eq!(store.get_all().await, vec![fresh]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_with_one_id_admit_exactly_one() {
        let store = Arc::new(ProductStore::without_expiry());
        let id = Uuid::new_v4();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let mut candidate = product(&format!("candidate-{i}"));
                    candidate.id = id;
                    store.try_insert(candidate).await
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(store.len().await, 1);
    }

    #[test]
    fn test_store_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("STORE_SHARDS", None::<&str>),
                ("STORE_TTL_SECS", None::<&str>),
            ],
            || {
                let config = StoreConfig::from_env().unwrap();
                assert_eq!(config, StoreConfig::default());
            },
        );
    }

    #[test]
    fn test_store_config_zero_ttl_disables_expiry() {
        temp_env::with_vars(
            [("STORE_SHARDS", Some("8")), ("STORE_TTL_SECS", Some("0"))],
            || {
                let config = StoreConfig::from_env().unwrap();
                assert_eq!(config.shards, 8);
                assert_eq!(config.ttl, None);
            },
        );
    }

    #[test]
    fn test_store_config_rejects_bad_values() {
        temp_env::with_var("STORE_SHARDS", Some("0"), || {
            assert!(matches!(
                StoreConfig::from_env(),
                Err(ConfigError::InvalidValue { .. })
            ));
        });
        temp_env::with_var("STORE_TTL_SECS", Some("soon"), || {
            assert!(matches!(
                StoreConfig::from_env(),
                Err(ConfigError::ParseError { .. })
            ));
        });
    }

    #[test]
    fn test_store_config_rejects_ttl_beyond_clock_range() {
        temp_env::with_var("STORE_TTL_SECS", Some(u64::MAX.to_string()), || {
            assert!(matches!(
                StoreConfig::from_env(),
                Err(ConfigError::InvalidValue { key, .. }) if key == "STORE_TTL_SECS"
            ));
        });
    }

    #[tokio::test]
    async fn test_unbounded_ttl_never_expires() {
        let store = ttl_store(Duration::MAX);
        let widget = product("Widget");

        assert!(store.try_insert(widget.clone()).await);
        assert!(store.try_update(widget.id, widget.clone()).await);
        assert_eq!(store.get(widget.id).await, Some(widget));
        assert_eq!(store.purge_expired().await, 0);
    }
}
