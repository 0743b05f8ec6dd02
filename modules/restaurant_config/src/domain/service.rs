//! Domain service - business logic orchestration

use super::cache::LookupCache;
use super::config_state::ConfigStore;
use super::currency;
use super::repository::{ConfigSource, ObjectStorage};
use super::uploader::AssetUploader;
use crate::config::Config;
use crate::contract::{
    AssetCategory, AssetError, PricingConfig, ProgressCallback, StoredAsset, UploadFile,
};
use std::sync::Arc;

/// Stock cache keyed by ingredient or menu item identifier
pub type StockCache = LookupCache<String, f64>;

/// Domain service owning pricing state, the stock cache and the asset uploader
pub struct Service {
    config: ConfigStore,
    stock: StockCache,
    uploader: AssetUploader,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        config_source: Arc<dyn ConfigSource>,
        storage: Arc<dyn ObjectStorage>,
        cfg: &Config,
    ) -> Self {
        Self {
            config: ConfigStore::new(config_source),
            stock: LookupCache::new(cfg.stock_cache_ttl),
            uploader: AssetUploader::new(storage, cfg.max_upload_bytes, cfg.cache_control.clone()),
        }
    }

    // ===== Pricing Configuration =====

    /// Re-sync pricing configuration, keeping the last known values on failure
    pub async fn refresh_config(&self) -> PricingConfig {
        self.config.refresh().await
    }

    /// Snapshot of the current pricing configuration
    pub fn current_config(&self) -> PricingConfig {
        self.config.current()
    }

    pub fn to_secondary_currency(&self, amount: f64, rate: Option<f64>) -> f64 {
        currency::to_secondary_currency(amount, rate, &self.config.current())
    }

    pub fn to_base_currency(&self, amount: f64, rate: Option<f64>) -> f64 {
        currency::to_base_currency(amount, rate, &self.config.current())
    }

    // ===== Stock Levels =====

    /// Short-lived stock level cache
    pub fn stock_cache(&self) -> &StockCache {
        &self.stock
    }

    /// Whether `level` is at or below the configured alert threshold
    pub fn is_low_stock(&self, level: f64) -> bool {
        level <= f64::from(self.config.current().min_stock_alert_threshold)
    }

    // ===== Media Assets =====

    /// Upload an image of the given category under an optional subfolder
    pub async fn upload_image(
        &self,
        file: Option<UploadFile>,
        category: AssetCategory,
        subfolder: Option<&str>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<StoredAsset, AssetError> {
        self.uploader
            .upload(file, category, subfolder, on_progress)
            .await
    }

    /// Upload a payment receipt into `folder` (e.g. "pedidos", "reservas")
    pub async fn upload_receipt(
        &self,
        file: Option<UploadFile>,
        folder: &str,
        on_progress: Option<ProgressCallback>,
    ) -> Result<StoredAsset, AssetError> {
        self.uploader
            .upload(file, AssetCategory::Receipt, Some(folder), on_progress)
            .await
    }

    /// Remove a dish image by its public URL
    pub async fn remove_image(&self, url: &str) -> Result<(), AssetError> {
        self.uploader.remove(url, AssetCategory::DishImage).await
    }

    /// Remove an asset of any category by its public URL
    pub async fn remove_asset(&self, url: &str, category: AssetCategory) -> Result<(), AssetError> {
        self.uploader.remove(url, category).await
    }
}
