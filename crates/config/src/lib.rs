mod loader;
mod rate_limit;
mod server;
mod tenant;

use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;

pub use rate_limit::{PerTenantRateLimitConfig, RateLimitConfig};
pub use server::{HealthConfig, ServerConfig, TlsServerConfig};
pub use tenant::TenantConfig;

/// Top-level configuration for the gateway.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Static tenant list, keyed by tenant id.
    pub tenants: BTreeMap<String, TenantConfig>,
}

impl Config {
    /// Load and validate the configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        loader::load(path)
    }
}
