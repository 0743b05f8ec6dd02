//! Remote store traits
//!
//! These traits define the interface to the remote document store and
//! object storage. The HTTP implementation lives in infra/remote.

use crate::contract::ProgressCallback;
use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Source of the pricing configuration document
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Fetch the configuration row as a JSON object (column name -> value)
    async fn fetch_config(&self) -> Result<serde_json::Map<String, serde_json::Value>>;
}

/// Options for a single object upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOptions {
    /// MIME type stored with the object
    pub content_type: String,
    /// `Cache-Control` max-age in seconds
    pub cache_control: String,
    /// Replace an existing object at the same path
    pub upsert: bool,
}

/// Remote object storage
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` at `path` in `bucket`
    ///
    /// When [`ObjectStorage::reports_progress`] is true the implementation
    /// drives `progress` itself while sending, but never reports completion;
    /// the caller emits the final 100% after `put` succeeds.
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        options: &PutOptions,
        progress: Option<ProgressCallback>,
    ) -> Result<()>;

    /// Public URL of an object; no remote call is made
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Remove objects from `bucket`
    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<()>;

    /// Whether `put` emits native progress events
    fn reports_progress(&self) -> bool {
        false
    }
}
