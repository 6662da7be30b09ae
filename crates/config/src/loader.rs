use std::{collections::HashMap, path::Path};

use anyhow::bail;
use indoc::indoc;

use crate::Config;

pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let config: Config = toml::from_str(&content)?;

    validate_tenants(&config)?;
    validate_rate_limits(&config)?;

    Ok(config)
}

pub(crate) fn validate_tenants(config: &Config) -> anyhow::Result<()> {
    if config.tenants.is_empty() {
        bail!(indoc! {r#"
            No tenants configured. Hive requires at least one tenant with an API key to serve requests.

            Example configuration:

              [tenants.acme]
              api_key = "sk-live-change-me"
              display_name = "Acme Inc."
        "#});
    }

    let mut seen_keys: HashMap<&str, &str> = HashMap::new();

    for (id, tenant) in &config.tenants {
        if tenant.api_key.is_empty() {
            bail!("Tenant '{id}' has an empty api_key");
        }

        if let Some(previous) = seen_keys.insert(tenant.api_key.as_str(), id.as_str()) {
            bail!("Tenants '{previous}' and '{id}' share the same api_key; API keys must be unique");
        }
    }

    Ok(())
}

pub(crate) fn validate_rate_limits(config: &Config) -> anyhow::Result<()> {
    let rate_limits = &config.server.rate_limits;

    if !rate_limits.enabled {
        log::warn!("Per-tenant rate limiting is disabled; tenants can send unlimited requests");
        return Ok(());
    }

    if rate_limits.per_tenant.limit == 0 {
        bail!(
            "server.rate_limits.per_tenant.limit must be greater than zero; \
             to turn throttling off set server.rate_limits.enabled = false instead"
        );
    }

    if rate_limits.per_tenant.interval.is_zero() {
        bail!("server.rate_limits.per_tenant.interval must be a non-zero duration");
    }

    Ok(())
}
