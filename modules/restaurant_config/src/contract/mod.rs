//! Contract layer - public API for in-process consumers
//!
//! This layer contains transport-agnostic models and the native client trait.

pub mod client;
pub mod error;
pub mod model;

pub use client::RestaurantConfigApi;
pub use error::{AssetError, ErrorKind};
pub use model::{
    AssetCategory, PricingConfig, ProgressCallback, StoredAsset, UploadFile, UploadProgress,
};
