//! Common test utilities: in-memory remote store mocks and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use restaurant_config::config::Config;
use restaurant_config::domain::{ConfigSource, ObjectStorage, PutOptions};
use restaurant_config::{ProgressCallback, UploadProgress};
use serde_json::{Map, Value};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const BASE_URL: &str = "https://demo.supabase.co";

/// Install a test-friendly tracing subscriber once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("restaurant_config=debug")
        .try_init();
}

pub fn test_config() -> Config {
    let mut cfg = Config::default();
    cfg.remote.base_url = BASE_URL.to_string();
    cfg.remote.api_key = "anon-test-key".to_string();
    cfg
}

pub fn json_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {}", other),
    }
}

/// Config source replaying scripted responses; repeats the last one when exhausted
pub struct MockConfigSource {
    responses: Mutex<VecDeque<Result<Map<String, Value>, String>>>,
    calls: AtomicUsize,
}

impl MockConfigSource {
    pub fn new(responses: Vec<Result<Value, &str>>) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|r| r.map(json_object).map_err(str::to_string))
                    .collect(),
            ),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigSource for MockConfigSource {
    async fn fetch_config(&self) -> anyhow::Result<Map<String, Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut responses = self.responses.lock();
        let next = if responses.len() > 1 {
            responses.pop_front()
        } else {
            responses.front().cloned()
        };
        match next {
            Some(Ok(row)) => Ok(row),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Err(anyhow::anyhow!("no scripted response")),
        }
    }
}

/// Recorded object upload
#[derive(Debug, Clone)]
pub struct RecordedPut {
    pub bucket: String,
    pub path: String,
    pub size: usize,
    pub options: PutOptions,
}

/// Object storage that keeps paths in memory and refuses overwrites like the real one
#[derive(Default)]
pub struct MockStorage {
    pub puts: Mutex<Vec<RecordedPut>>,
    pub removes: Mutex<Vec<(String, Vec<String>)>>,
    objects: Mutex<HashSet<(String, String)>>,
    fail_with: Mutex<Option<String>>,
    native_progress: bool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that emits progress per 1 KiB while "sending"
    pub fn with_native_progress() -> Self {
        Self {
            native_progress: true,
            ..Self::default()
        }
    }

    pub fn fail_with(&self, message: &str) {
        *self.fail_with.lock() = Some(message.to_string());
    }

    pub fn insert_object(&self, bucket: &str, path: &str) {
        self.objects
            .lock()
            .insert((bucket.to_string(), path.to_string()));
    }

    pub fn contains(&self, bucket: &str, path: &str) -> bool {
        self.objects
            .lock()
            .contains(&(bucket.to_string(), path.to_string()))
    }

    /// Number of remote calls of any kind
    pub fn remote_calls(&self) -> usize {
        self.puts.lock().len() + self.removes.lock().len()
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        options: &PutOptions,
        progress: Option<ProgressCallback>,
    ) -> anyhow::Result<()> {
        self.puts.lock().push(RecordedPut {
            bucket: bucket.to_string(),
            path: path.to_string(),
            size: data.len(),
            options: options.clone(),
        });
        // Bytes go out before the store answers; the final chunk is left to the caller
        if let Some(progress) = progress {
            let total = data.len() as u64;
            let mut sent = 1024u64;
            while sent < total {
                progress(UploadProgress::new(sent, total));
                sent += 1024;
            }
        }

        if let Some(message) = self.fail_with.lock().clone() {
            anyhow::bail!(message);
        }

        let key = (bucket.to_string(), path.to_string());
        if !options.upsert && self.objects.lock().contains(&key) {
            anyhow::bail!("The resource already exists");
        }

        self.objects.lock().insert(key);
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", BASE_URL, bucket, path)
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> anyhow::Result<()> {
        self.removes
            .lock()
            .push((bucket.to_string(), paths.to_vec()));
        if let Some(message) = self.fail_with.lock().clone() {
            anyhow::bail!(message);
        }
        let mut objects = self.objects.lock();
        for path in paths {
            objects.remove(&(bucket.to_string(), path.clone()));
        }
        Ok(())
    }

    fn reports_progress(&self) -> bool {
        self.native_progress
    }
}
