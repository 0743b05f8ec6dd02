//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    AssetCategory, AssetError, PricingConfig, ProgressCallback, RestaurantConfigApi, StoredAsset,
    UploadFile,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RestaurantConfigApi for NativeClient {
    async fn refresh_config(&self) -> PricingConfig {
        self.service.refresh_config().await
    }

    fn current_config(&self) -> PricingConfig {
        self.service.current_config()
    }

    fn to_secondary_currency(&self, amount: f64, rate: Option<f64>) -> f64 {
        self.service.to_secondary_currency(amount, rate)
    }

    fn to_base_currency(&self, amount: f64, rate: Option<f64>) -> f64 {
        self.service.to_base_currency(amount, rate)
    }

    async fn upload_image(
        &self,
        file: Option<UploadFile>,
        category: AssetCategory,
        subfolder: Option<&str>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<StoredAsset, AssetError> {
        self.service
            .upload_image(file, category, subfolder, on_progress)
            .await
    }

    async fn upload_receipt(
        &self,
        file: Option<UploadFile>,
        folder: &str,
        on_progress: Option<ProgressCallback>,
    ) -> Result<StoredAsset, AssetError> {
        self.service.upload_receipt(file, folder, on_progress).await
    }

    async fn remove_image(&self, url: &str) -> Result<(), AssetError> {
        self.service.remove_image(url).await
    }
}
