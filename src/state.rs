use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::{Store, seed};

/// Shared ownership of the configuration and the store; everything else in
/// the API layer hangs off this.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        // Demo deployments never migrate in place: the schema is rebuilt on
        // startup and the fixed demo dataset reseeded.
        if config.general.recreate_on_start {
            store.reset().await?;
        }
        if config.general.seed_demo_data {
            seed::ensure_demo_data(&store, &config.security).await?;
        }

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
