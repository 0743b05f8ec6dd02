//! Media asset upload and removal against remote object storage

use super::format::random_token;
use super::repository::{ObjectStorage, PutOptions};
use super::validation::validate_upload;
use crate::contract::{
    AssetCategory, AssetError, ProgressCallback, StoredAsset, UploadFile, UploadProgress,
};
use std::sync::Arc;

/// Length of the random token in dish image file names
const TOKEN_LEN: usize = 6;

/// Uploads dish images and receipts and removes them by public URL
pub struct AssetUploader {
    storage: Arc<dyn ObjectStorage>,
    max_upload_bytes: u64,
    cache_control: String,
}

impl AssetUploader {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        max_upload_bytes: u64,
        cache_control: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            max_upload_bytes,
            cache_control: cache_control.into(),
        }
    }

    /// Validate and store `file`, returning its path and public URL.
    ///
    /// Validation failures return before the storage is touched. Objects are
    /// never overwritten: a path collision is reported as a remote error.
    pub async fn upload(
        &self,
        file: Option<UploadFile>,
        category: AssetCategory,
        subfolder: Option<&str>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<StoredAsset, AssetError> {
        let millis = chrono::Utc::now().timestamp_millis();
        self.upload_at(file, category, subfolder, on_progress, millis)
            .await
    }

    /// [`AssetUploader::upload`] with the file name timestamp fixed to `millis`
    pub async fn upload_at(
        &self,
        file: Option<UploadFile>,
        category: AssetCategory,
        subfolder: Option<&str>,
        on_progress: Option<ProgressCallback>,
        millis: i64,
    ) -> Result<StoredAsset, AssetError> {
        let file = validate_upload(file.as_ref(), self.max_upload_bytes).map_err(|e| {
            tracing::warn!(category = %category, error = %e, "Rejected upload");
            e
        })?;

        let file_name = object_file_name(file, category, millis);
        let path = object_path(subfolder, &file_name);
        let bucket = category.bucket();
        let options = PutOptions {
            content_type: file.content_type.clone(),
            cache_control: self.cache_control.clone(),
            upsert: false,
        };

        let transport_progress = if self.storage.reports_progress() {
            on_progress.clone()
        } else {
            None
        };

        if let Err(e) = self
            .storage
            .put(bucket, &path, file.data.clone(), &options, transport_progress)
            .await
        {
            tracing::error!(bucket, path = %path, error = ?e, "Failed to upload asset");
            return Err(AssetError::remote("upload", &e));
        }

        if let Some(on_progress) = on_progress {
            on_progress(UploadProgress::complete(file.size()));
        }

        let url = self.storage.public_url(bucket, &path);
        tracing::info!(bucket, path = %path, bytes = file.size(), "Uploaded asset");

        Ok(StoredAsset {
            category,
            path,
            url,
        })
    }

    /// Remove the object behind a public URL of `category`'s bucket.
    ///
    /// URLs that are empty or do not point into the bucket are left alone and
    /// reported as success.
    pub async fn remove(&self, url: &str, category: AssetCategory) -> Result<(), AssetError> {
        let bucket = category.bucket();
        let Some(path) = relative_path_from_url(url, bucket) else {
            tracing::debug!(bucket, url, "URL does not belong to bucket, nothing to remove");
            return Ok(());
        };

        self.storage
            .remove(bucket, std::slice::from_ref(&path))
            .await
            .map_err(|e| {
                tracing::error!(bucket, path = %path, error = ?e, "Failed to remove asset");
                AssetError::remote("remove", &e)
            })?;

        tracing::info!(bucket, path = %path, "Removed asset");
        Ok(())
    }
}

/// `{millis}_{token}.{ext}` for dish images, `{millis}_{sanitized stem}.{ext}` for receipts
pub fn object_file_name(file: &UploadFile, category: AssetCategory, millis: i64) -> String {
    let (stem, extension) = split_file_name(file);
    let label = match category {
        AssetCategory::DishImage => random_token(TOKEN_LEN),
        AssetCategory::Receipt => {
            let sanitized = sanitize(stem);
            if sanitized.is_empty() {
                random_token(TOKEN_LEN)
            } else {
                sanitized
            }
        }
    };
    format!("{}_{}.{}", millis, label, extension)
}

/// `[subfolder/]file_name`, ignoring stray slashes around the subfolder
pub fn object_path(subfolder: Option<&str>, file_name: &str) -> String {
    match subfolder.map(|s| s.trim_matches('/')) {
        Some(folder) if !folder.is_empty() => format!("{}/{}", folder, file_name),
        _ => file_name.to_string(),
    }
}

/// Object path inside `bucket` addressed by a public URL, if it is one of ours
pub fn relative_path_from_url(url: &str, bucket: &str) -> Option<String> {
    let marker = format!("/public/{}/", bucket);
    let start = url.find(&marker)? + marker.len();
    let rest = &url[start..];
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    let raw = &rest[..end];
    if raw.is_empty() {
        return None;
    }
    let path = urlencoding::decode(raw)
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    Some(path)
}

/// Stem and extension of the original name; the extension falls back to the MIME subtype
fn split_file_name(file: &UploadFile) -> (&str, String) {
    match file.name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            (stem, ext.to_string())
        }
        _ => (file.name.as_str(), extension_for_mime(&file.content_type)),
    }
}

fn extension_for_mime(content_type: &str) -> String {
    content_type
        .parse::<mime::Mime>()
        .map(|m| match m.subtype().as_str() {
            "jpeg" | "jpg" => "jpg".to_string(),
            other => other.to_ascii_lowercase(),
        })
        .unwrap_or_else(|_| "bin".to_string())
}

fn sanitize(stem: &str) -> String {
    stem.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
