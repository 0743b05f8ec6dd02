//! Native client trait for in-process consumers
//!
//! Ordering screens and the admin panel use this trait to read pricing,
//! convert amounts and manage media assets. NO HTTP - direct function calls.

use super::{
    error::AssetError,
    model::{AssetCategory, PricingConfig, ProgressCallback, StoredAsset, UploadFile},
};
use async_trait::async_trait;

/// Restaurant config API for in-process communication
#[async_trait]
pub trait RestaurantConfigApi: Send + Sync {
    // ===== Pricing Configuration =====

    /// Re-sync pricing configuration and return the merged record.
    /// Falls back to the last known configuration when the remote is unreachable.
    async fn refresh_config(&self) -> PricingConfig;

    /// Snapshot of the current pricing configuration
    fn current_config(&self) -> PricingConfig;

    /// Convert a base-currency amount using `rate` or the effective rate
    fn to_secondary_currency(&self, amount: f64, rate: Option<f64>) -> f64;

    /// Convert a secondary-currency amount using `rate` or the effective rate
    fn to_base_currency(&self, amount: f64, rate: Option<f64>) -> f64;

    // ===== Media Assets =====

    /// Upload an image of the given category under an optional subfolder
    async fn upload_image(
        &self,
        file: Option<UploadFile>,
        category: AssetCategory,
        subfolder: Option<&str>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<StoredAsset, AssetError>;

    /// Upload a payment receipt into the `folder` subfolder of the receipt bucket
    async fn upload_receipt(
        &self,
        file: Option<UploadFile>,
        folder: &str,
        on_progress: Option<ProgressCallback>,
    ) -> Result<StoredAsset, AssetError>;

    /// Remove a dish image by its public URL
    async fn remove_image(&self, url: &str) -> Result<(), AssetError>;
}
