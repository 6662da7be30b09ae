//! Request throttling configuration.

use std::time::Duration;

use serde::Deserialize;

/// Request throttling configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RateLimitConfig {
    /// Whether per-tenant throttling is applied at all.
    pub enabled: bool,
    /// The sliding-window quota applied to every tenant.
    pub per_tenant: PerTenantRateLimitConfig,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            per_tenant: PerTenantRateLimitConfig::default(),
        }
    }
}

/// Sliding-window quota: at most `limit` admitted requests within any
/// trailing `interval`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerTenantRateLimitConfig {
    pub limit: u32,
    #[serde(deserialize_with = "duration_str::deserialize_duration")]
    pub interval: Duration,
}

impl Default for PerTenantRateLimitConfig {
    fn default() -> Self {
        Self {
            limit: 5,
            interval: Duration::from_secs(60),
        }
    }
}
