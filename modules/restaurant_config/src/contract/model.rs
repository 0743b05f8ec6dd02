//! Contract models for restaurant config
//!
//! `PricingConfig` carries serde derives because its field names are the
//! column names of the remote `config` row; the shallow merge works on that
//! representation. The upload models are pure domain types.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Exchange rate used when neither the caller nor the synced config provides one
pub const DEFAULT_EXCHANGE_RATE: f64 = 400.0;

/// Stock level at or below which an item is reported as running low
pub const DEFAULT_MIN_STOCK_ALERT: u32 = 5;

/// Pricing and exchange-rate configuration mirrored from the remote store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Reference exchange rate (secondary currency units per base unit)
    #[serde(rename = "tasa_cambio")]
    pub exchange_rate_base: f64,
    /// Rate actually applied to conversions, including accumulated increases
    #[serde(rename = "tasa_efectiva")]
    pub exchange_rate_effective: f64,
    /// Percentage added to the effective rate each day while active
    #[serde(rename = "aumento_diario")]
    pub daily_increase: f64,
    /// Total percentage accumulated since the increase was activated
    #[serde(rename = "aumento_acumulado")]
    pub accumulated_increase: f64,
    /// Whether the daily increase is currently applied
    #[serde(rename = "aumento_activo")]
    pub increase_active: bool,
    /// Whether the daily increase was manually stopped
    #[serde(rename = "aumento_detenido")]
    pub increase_stopped: bool,
    /// When the daily increase was last applied
    #[serde(rename = "fecha_ultimo_aumento", default, with = "lenient_timestamp")]
    pub last_increase_date: Option<DateTime<Utc>>,
    /// When the remote row was last written
    #[serde(rename = "ultima_actualizacion", default, with = "lenient_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Stock level that triggers a low-stock alert
    #[serde(rename = "stock_minimo_alerta")]
    pub min_stock_alert_threshold: u32,
    /// Remote columns without a typed field, kept so they survive merges
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            exchange_rate_base: DEFAULT_EXCHANGE_RATE,
            exchange_rate_effective: DEFAULT_EXCHANGE_RATE,
            daily_increase: 0.0,
            accumulated_increase: 0.0,
            increase_active: false,
            increase_stopped: false,
            last_increase_date: None,
            last_updated: None,
            min_stock_alert_threshold: DEFAULT_MIN_STOCK_ALERT,
            extra: serde_json::Map::new(),
        }
    }
}

/// Logical class of a stored media asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    /// Menu dish photo, publicly displayed
    DishImage,
    /// Payment receipt attached to an order or reservation
    Receipt,
}

impl AssetCategory {
    /// Object-storage bucket holding assets of this category
    pub fn bucket(self) -> &'static str {
        match self {
            Self::DishImage => "imagenes-platillos",
            Self::Receipt => "comprobantes",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DishImage => "dish-image",
            Self::Receipt => "receipt",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File handed in by a caller for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Original file name as chosen by the user (e.g. "pago-movil.png")
    pub name: String,
    /// Declared MIME type
    pub content_type: String,
    /// File contents
    pub data: Bytes,
}

impl UploadFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Payload size in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Upload progress snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    /// Bytes sent so far
    pub loaded: u64,
    /// Total bytes to send
    pub total: u64,
    /// Whole percentage in `0..=100`
    pub percent: u8,
}

impl UploadProgress {
    pub fn new(loaded: u64, total: u64) -> Self {
        let percent = if total == 0 {
            100
        } else {
            (loaded.min(total).saturating_mul(100) / total) as u8
        };
        Self {
            loaded,
            total,
            percent,
        }
    }

    /// Final snapshot for a transfer of `total` bytes
    pub fn complete(total: u64) -> Self {
        Self::new(total, total)
    }
}

/// Caller-supplied progress observer
pub type ProgressCallback = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// Successfully stored asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    /// Category the asset was stored under
    pub category: AssetCategory,
    /// Path relative to the category bucket
    pub path: String,
    /// Publicly resolvable URL of the object
    pub url: String,
}

/// Timestamps as written by the remote store.
///
/// Accepts RFC 3339, naive date-times (taken as UTC) and plain dates.
mod lenient_timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| {
            parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{s}'")))
        })
        .transpose()
    }

    pub(super) fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
            return Some(ts.with_timezone(&Utc));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_match_remote_defaults() {
        let cfg = PricingConfig::default();
        assert_eq!(cfg.exchange_rate_base, 400.0);
        assert_eq!(cfg.exchange_rate_effective, 400.0);
        assert!(!cfg.increase_active);
        assert!(cfg.last_updated.is_none());
    }

    #[test]
    fn test_row_uses_remote_column_names() {
        let value = serde_json::to_value(PricingConfig::default()).unwrap();
        assert_eq!(value["tasa_efectiva"], json!(400.0));
        assert_eq!(value["aumento_activo"], json!(false));
        assert_eq!(value["fecha_ultimo_aumento"], json!(null));
    }

    #[test]
    fn test_lenient_timestamps() {
        assert!(lenient_timestamp::parse("2025-03-01T12:30:00+00:00").is_some());
        assert!(lenient_timestamp::parse("2025-03-01T12:30:00.123456").is_some());
        assert!(lenient_timestamp::parse("2025-03-01 12:30:00").is_some());
        assert!(lenient_timestamp::parse("2025-03-01").is_some());
        assert!(lenient_timestamp::parse("yesterday").is_none());
    }

    #[test]
    fn test_upload_progress_percent() {
        assert_eq!(UploadProgress::new(0, 200).percent, 0);
        assert_eq!(UploadProgress::new(50, 200).percent, 25);
        assert_eq!(UploadProgress::complete(200).percent, 100);
        assert_eq!(UploadProgress::complete(0).percent, 100);
    }

    #[test]
    fn test_category_buckets() {
        assert_eq!(AssetCategory::DishImage.bucket(), "imagenes-platillos");
        assert_eq!(AssetCategory::Receipt.bucket(), "comprobantes");
        assert_eq!(AssetCategory::Receipt.to_string(), "receipt");
    }
}
