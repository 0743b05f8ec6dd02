//! Remote store over HTTP - REST document fetch and object storage

pub mod client;
pub mod error;

pub use client::SupabaseStore;
pub use error::RemoteStoreError;
