//! Pricing configuration state and its synchronization with the remote store

use super::repository::ConfigSource;
use crate::contract::PricingConfig;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Result of merging a remote row
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub config: PricingConfig,
    /// Keys whose values could not be decoded and were skipped
    pub rejected: Vec<String>,
}

/// Shallow-merge a remote row into `current`.
///
/// Keys present in `patch` overwrite the matching field (an explicit `null`
/// clears a nullable field); every other field keeps its current value.
/// Each key is applied on its own, so a value that does not decode only
/// loses that key.
pub fn shallow_merge(current: &PricingConfig, patch: &Map<String, Value>) -> MergeOutcome {
    let mut config = current.clone();
    let mut rejected = Vec::new();
    for (key, value) in patch {
        match apply_field(&config, key, value) {
            Ok(next) => config = next,
            Err(e) => {
                tracing::warn!(
                    field = %key,
                    error = %e,
                    "Skipping remote pricing field with invalid value"
                );
                rejected.push(key.clone());
            }
        }
    }
    MergeOutcome { config, rejected }
}

fn apply_field(
    current: &PricingConfig,
    key: &str,
    value: &Value,
) -> Result<PricingConfig, serde_json::Error> {
    let mut fields = match serde_json::to_value(current)? {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    fields.insert(key.to_string(), value.clone());
    let next: PricingConfig = serde_json::from_value(Value::Object(fields))?;
    if next.exchange_rate_base < 0.0 || next.exchange_rate_effective < 0.0 {
        return Err(serde::de::Error::custom("exchange rate must not be negative"));
    }
    Ok(next)
}

/// Owner of the in-memory pricing configuration
///
/// Starts from defaults and only changes through [`ConfigStore::refresh`].
pub struct ConfigStore {
    source: Arc<dyn ConfigSource>,
    state: RwLock<PricingConfig>,
}

impl ConfigStore {
    pub fn new(source: Arc<dyn ConfigSource>) -> Self {
        Self::with_initial(source, PricingConfig::default())
    }

    pub fn with_initial(source: Arc<dyn ConfigSource>, initial: PricingConfig) -> Self {
        Self {
            source,
            state: RwLock::new(initial),
        }
    }

    /// Snapshot of the current configuration
    pub fn current(&self) -> PricingConfig {
        self.state.read().clone()
    }

    /// Fetch the remote row and merge it into the current state.
    ///
    /// Never fails: on a fetch error the last known configuration is
    /// returned unchanged, and fields that do not decode keep their values.
    pub async fn refresh(&self) -> PricingConfig {
        let patch = match self.source.fetch_config().await {
            Ok(patch) => patch,
            Err(e) => {
                tracing::error!(error = ?e, "Failed to load pricing config, keeping last known values");
                return self.current();
            }
        };

        // Merge against the state as of completion; the lock is never held across the fetch.
        let mut state = self.state.write();
        let outcome = shallow_merge(&state, &patch);
        *state = outcome.config;
        tracing::debug!(
            fields = patch.len(),
            rejected = outcome.rejected.len(),
            effective_rate = state.exchange_rate_effective,
            "Pricing config refreshed"
        );
        state.clone()
    }
}
