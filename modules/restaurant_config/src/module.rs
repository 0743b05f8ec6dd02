//! Module declaration and lifecycle implementation

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::RestaurantConfigApi;
use crate::domain::{ConfigSource, ObjectStorage, Service};
use crate::infra::remote::SupabaseStore;
use anyhow::Result;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Restaurant config module
pub struct RestaurantConfigModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for RestaurantConfigModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            service: RwLock::new(None),
        }
    }
}

impl RestaurantConfigModule {
    /// Build the HTTP remote store from `cfg` and initialize the module
    pub async fn init(&self, cfg: Config) -> Result<()> {
        cfg.validate()?;
        let store = Arc::new(SupabaseStore::new(&cfg.remote)?);
        self.init_with(cfg, store.clone(), store).await
    }

    /// Initialize with explicit remote store implementations.
    ///
    /// Performs one pricing refresh so consumers start from synced values
    /// whenever the remote is reachable.
    pub async fn init_with(
        &self,
        cfg: Config,
        config_source: Arc<dyn ConfigSource>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Result<()> {
        let service = Arc::new(Service::new(config_source, storage, &cfg));
        let pricing = service.refresh_config().await;

        *self.config.write() = cfg;
        *self.service.write() = Some(service);

        tracing::info!(
            effective_rate = pricing.exchange_rate_effective,
            "Restaurant config module initialized"
        );
        Ok(())
    }

    /// Domain service; fails before `init`
    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client for consumers
    pub fn client(&self) -> Result<Arc<dyn RestaurantConfigApi>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }

    /// Keep pricing in sync until `cancel` fires
    pub async fn serve(self: Arc<Self>, cancel: CancellationToken) -> Result<()> {
        let service = self.service()?;
        let period = self.config.read().refresh_interval;

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately and init already refreshed
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Restaurant config refresh loop stopped");
                    break;
                }
                _ = ticker.tick() => {
                    service.refresh_config().await;
                }
            }
        }
        Ok(())
    }
}
