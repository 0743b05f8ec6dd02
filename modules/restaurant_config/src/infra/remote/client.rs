//! HTTP client for a Supabase-compatible REST + Storage API

use super::error::RemoteStoreError;
use crate::config::RemoteConfig;
use crate::contract::{ProgressCallback, UploadProgress};
use crate::domain::repository::{ConfigSource, ObjectStorage, PutOptions};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::{Map, Value};

/// Upload body chunk size; progress is reported once per chunk
const UPLOAD_CHUNK: usize = 64 * 1024;

/// Longest response body excerpt kept in error messages
const ERROR_BODY_PREVIEW: usize = 300;

/// Remote store reached over HTTP
///
/// Implements both the configuration document source and the object storage.
#[derive(Clone)]
pub struct SupabaseStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    config_table: String,
    config_row_id: i64,
}

impl SupabaseStore {
    pub fn new(remote: &RemoteConfig) -> Result<Self, RemoteStoreError> {
        let base_url = remote.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| RemoteStoreError::InvalidUrl {
            input: remote.base_url.clone(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(remote.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key: remote.api_key.clone(),
            config_table: remote.config_table.clone(),
            config_row_id: remote.config_row_id,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn fetch_row(&self) -> Result<Map<String, Value>, RemoteStoreError> {
        let operation = "config fetch";
        let request = self
            .http
            .get(self.endpoint(&format!("rest/v1/{}", self.config_table)))
            .query(&[
                ("id", format!("eq.{}", self.config_row_id)),
                ("select", "*".to_string()),
            ])
            .header(ACCEPT, "application/vnd.pgrst.object+json");

        let response = self.authorized(request).send().await?;
        let resource = format!("{} row {}", self.config_table, self.config_row_id);
        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::NOT_ACCEPTABLE
        ) {
            return Err(RemoteStoreError::NotFound { resource });
        }
        let response = ensure_success(response, operation).await?;

        match response.json::<Value>().await? {
            Value::Object(row) => Ok(row),
            // Servers ignoring the single-object Accept header answer with an array
            Value::Array(rows) => match rows.into_iter().next() {
                Some(Value::Object(row)) => Ok(row),
                Some(_) => Err(RemoteStoreError::UnexpectedResponse {
                    operation,
                    reason: "row is not a JSON object".to_string(),
                }),
                None => Err(RemoteStoreError::NotFound { resource }),
            },
            other => Err(RemoteStoreError::UnexpectedResponse {
                operation,
                reason: format!("expected a JSON object, got {}", other),
            }),
        }
    }

    async fn put_object(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        options: &PutOptions,
        progress: Option<ProgressCallback>,
    ) -> Result<(), RemoteStoreError> {
        let total = data.len();
        let body = match progress {
            Some(progress) => progress_body(data, progress),
            None => reqwest::Body::from(data),
        };

        let request = self
            .http
            .post(self.endpoint(&format!(
                "storage/v1/object/{}/{}",
                bucket,
                encode_path(path)
            )))
            .header(CONTENT_TYPE, &options.content_type)
            .header(CONTENT_LENGTH, total)
            .header(CACHE_CONTROL, format!("max-age={}", options.cache_control))
            .header("x-upsert", if options.upsert { "true" } else { "false" })
            .body(body);

        let response = self.authorized(request).send().await?;
        ensure_success(response, "object upload").await?;
        Ok(())
    }

    async fn remove_objects(&self, bucket: &str, paths: &[String]) -> Result<(), RemoteStoreError> {
        let request = self
            .http
            .delete(self.endpoint(&format!("storage/v1/object/{}", bucket)))
            .json(&serde_json::json!({ "prefixes": paths }));

        let response = self.authorized(request).send().await?;
        ensure_success(response, "object removal").await?;
        Ok(())
    }
}

#[async_trait]
impl ConfigSource for SupabaseStore {
    async fn fetch_config(&self) -> anyhow::Result<Map<String, Value>> {
        Ok(self.fetch_row().await?)
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStore {
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        options: &PutOptions,
        progress: Option<ProgressCallback>,
    ) -> anyhow::Result<()> {
        Ok(self.put_object(bucket, path, data, options, progress).await?)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.endpoint(&format!(
            "storage/v1/object/public/{}/{}",
            bucket,
            encode_path(path)
        ))
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> anyhow::Result<()> {
        Ok(self.remove_objects(bucket, paths).await?)
    }

    fn reports_progress(&self) -> bool {
        true
    }
}

/// Turn a non-2xx response into an error carrying a body excerpt
async fn ensure_success(
    response: Response,
    operation: &'static str,
) -> Result<Response, RemoteStoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
    tracing::warn!(
        status = status.as_u16(),
        operation,
        preview = %message,
        "remote store returned non-success status"
    );
    Err(RemoteStoreError::HttpStatus {
        status,
        operation,
        message,
    })
}

/// Percent-encode each segment of an object path, keeping the separators
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Stream `data` in chunks, reporting cumulative progress as each chunk is sent.
///
/// The last chunk is not reported: 100% is only known once the server accepts the object.
fn progress_body(data: Bytes, progress: ProgressCallback) -> reqwest::Body {
    let total = data.len() as u64;
    let chunks: Vec<Bytes> = (0..data.len())
        .step_by(UPLOAD_CHUNK)
        .map(|start| data.slice(start..(start + UPLOAD_CHUNK).min(data.len())))
        .collect();

    let mut sent = 0u64;
    let stream = futures::stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        if sent < total {
            progress(UploadProgress::new(sent, total));
        }
        Ok::<Bytes, std::io::Error>(chunk)
    });
    reqwest::Body::wrap_stream(stream)
}
