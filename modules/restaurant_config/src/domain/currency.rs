//! Currency conversion between the base currency (USD) and the secondary
//! currency (Bs.) using the effective exchange rate.

use crate::contract::model::{PricingConfig, DEFAULT_EXCHANGE_RATE};

/// Only positive numbers count as a rate
fn usable(rate: f64) -> Option<f64> {
    if rate > 0.0 {
        Some(rate)
    } else {
        None
    }
}

/// Rate to apply: the explicit one, else the effective config rate, else the default
pub fn resolve_rate(rate: Option<f64>, config: &PricingConfig) -> f64 {
    rate.and_then(usable)
        .or_else(|| usable(config.exchange_rate_effective))
        .unwrap_or(DEFAULT_EXCHANGE_RATE)
}

/// Base currency -> secondary currency
pub fn to_secondary_currency(amount: f64, rate: Option<f64>, config: &PricingConfig) -> f64 {
    amount * resolve_rate(rate, config)
}

/// Secondary currency -> base currency
pub fn to_base_currency(amount: f64, rate: Option<f64>, config: &PricingConfig) -> f64 {
    amount / resolve_rate(rate, config)
}
