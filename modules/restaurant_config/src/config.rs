//! Configuration for restaurant config module

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "RESTAURANT_CONFIG_";

/// Restaurant config module configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Remote store connection
    #[serde(default)]
    pub remote: RemoteConfig,

    /// How long stock lookups stay valid after the last write
    #[serde(default = "default_stock_cache_ttl", with = "humantime_serde")]
    pub stock_cache_ttl: Duration,

    /// Interval of the background pricing refresh
    #[serde(default = "default_refresh_interval", with = "humantime_serde")]
    pub refresh_interval: Duration,

    /// Maximum accepted upload size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// `Cache-Control` max-age (seconds) stored with uploaded objects
    #[serde(default = "default_cache_control")]
    pub cache_control: String,
}

/// Remote store (REST + object storage) connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`
    #[serde(default)]
    pub base_url: String,

    /// Publishable API key sent with every request
    #[serde(default)]
    pub api_key: String,

    /// Table holding the pricing configuration row
    #[serde(default = "default_config_table")]
    pub config_table: String,

    /// Primary key of the pricing configuration row
    #[serde(default = "default_config_row_id")]
    pub config_row_id: i64,

    /// Per-request timeout of the HTTP transport
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            stock_cache_ttl: default_stock_cache_ttl(),
            refresh_interval: default_refresh_interval(),
            max_upload_bytes: default_max_upload_bytes(),
            cache_control: default_cache_control(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            config_table: default_config_table(),
            config_row_id: default_config_row_id(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from an optional YAML file, overridden by
    /// `RESTAURANT_CONFIG_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let cfg: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load restaurant config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the module cannot run with
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.remote.base_url)
            .with_context(|| format!("invalid remote.base_url '{}'", self.remote.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("remote.base_url must use http or https, got '{}'", url.scheme());
        }
        if self.remote.api_key.trim().is_empty() {
            bail!("remote.api_key must not be empty");
        }
        if self.remote.config_table.trim().is_empty() {
            bail!("remote.config_table must not be empty");
        }
        if self.stock_cache_ttl.is_zero() || self.refresh_interval.is_zero() {
            bail!("stock_cache_ttl and refresh_interval must be non-zero");
        }
        if self.remote.request_timeout.is_zero() {
            bail!("remote.request_timeout must be non-zero");
        }
        if self.max_upload_bytes == 0 {
            bail!("max_upload_bytes must be non-zero");
        }
        Ok(())
    }
}

fn default_stock_cache_ttl() -> Duration {
    Duration::from_secs(30)
}

fn default_refresh_interval() -> Duration {
    Duration::from_secs(300)
}

fn default_max_upload_bytes() -> u64 {
    5 * 1024 * 1024 // 5MiB
}

fn default_cache_control() -> String {
    "3600".to_string()
}

fn default_config_table() -> String {
    "config".to_string()
}

fn default_config_row_id() -> i64 {
    1
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(cfg.remote.config_table, "config");
        assert_eq!(cfg.remote.config_row_id, 1);
        assert_eq!(cfg.stock_cache_ttl, Duration::from_secs(30));
        assert_eq!(cfg.cache_control, "3600");
    }

    #[test]
    fn test_default_config_is_rejected_without_remote() {
        assert!(Config::default().validate().is_err());
    }

    #[test]
    fn test_load_from_yaml_and_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "restaurant.yaml",
                r#"
remote:
  base_url: "https://demo.supabase.co"
  api_key: "anon-key"
stock_cache_ttl: "45s"
refresh_interval: "2m"
"#,
            )?;
            jail.set_env("RESTAURANT_CONFIG_MAX_UPLOAD_BYTES", "1024");
            jail.set_env("RESTAURANT_CONFIG_REMOTE__CONFIG_ROW_ID", "7");

            let cfg = Config::load(Some(Path::new("restaurant.yaml")))
                .map_err(|e| figment::Error::from(e.to_string()))?;
            assert_eq!(cfg.remote.base_url, "https://demo.supabase.co");
            assert_eq!(cfg.remote.config_row_id, 7);
            assert_eq!(cfg.max_upload_bytes, 1024);
            assert_eq!(cfg.stock_cache_ttl, Duration::from_secs(45));
            assert_eq!(cfg.refresh_interval, Duration::from_secs(120));
            Ok(())
        });
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "restaurant.yaml",
                r#"
remote:
  base_url: "https://demo.supabase.co"
  api_key: "anon-key"
admin_password: "654321"
"#,
            )?;
            assert!(Config::load(Some(Path::new("restaurant.yaml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut cfg = Config::default();
        cfg.remote.base_url = "ftp://demo.supabase.co".to_string();
        cfg.remote.api_key = "anon-key".to_string();
        assert!(cfg.validate().is_err());

        cfg.remote.base_url = "https://demo.supabase.co".to_string();
        assert!(cfg.validate().is_ok());
    }
}
