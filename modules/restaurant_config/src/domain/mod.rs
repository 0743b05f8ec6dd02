//! Domain layer - business logic and services

pub mod cache;
pub mod config_state;
pub mod currency;
pub mod format;
pub mod repository;
pub mod service;
pub mod uploader;
pub mod validation;

pub use cache::LookupCache;
pub use config_state::{ConfigStore, MergeOutcome};
pub use format::{format_bs, format_usd, generate_id};
pub use repository::{ConfigSource, ObjectStorage, PutOptions};
pub use service::{Service, StockCache};
pub use uploader::AssetUploader;
pub use validation::{is_valid_phone, is_valid_reference};
