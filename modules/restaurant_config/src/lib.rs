//! Restaurant Config Module
//!
//! Runtime configuration and media asset management for the restaurant
//! ordering application. Pricing configuration is synchronized from the
//! remote store, stock lookups are cached for a short window, and dish
//! images and payment receipts are uploaded to remote object storage.

// Public exports
pub mod contract;
pub use contract::{
    client::RestaurantConfigApi, error::AssetError, AssetCategory, ErrorKind, PricingConfig,
    ProgressCallback, StoredAsset, UploadFile, UploadProgress,
};

pub mod module;
pub use module::RestaurantConfigModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
