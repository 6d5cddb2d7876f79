//! Configuration for Products API

use core_config::{app_info, env_parse_or, server::ServerConfig, AppInfo, FromEnv};
use domain_products::seed::SeedConfig;
use domain_products::StoreConfig;
use std::time::Duration;

pub use core_config::Environment;

const DEFAULT_PURGE_INTERVAL_SECS: u64 = 60;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub store: StoreConfig,
    pub seed: SeedConfig,
    /// How often expired products are swept from the store
    pub purge_interval: Duration,
    /// Upper bound for cleanup once shutdown starts
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let store = StoreConfig::from_env()?;
        let seed = SeedConfig::from_env()?;

        let purge_secs: u64 = env_parse_or("STORE_PURGE_INTERVAL_SECS", DEFAULT_PURGE_INTERVAL_SECS)?;
        if purge_secs == 0 {
            eyre::bail!("STORE_PURGE_INTERVAL_SECS must be at least 1");
        }

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            store,
            seed,
            purge_interval: Duration::from_secs(purge_secs),
            shutdown_timeout: Duration::from_secs(30),
        })
    }
}
