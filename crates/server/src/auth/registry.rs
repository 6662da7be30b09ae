use std::collections::{BTreeMap, HashMap};

use config::TenantConfig;
use context::TenantIdentity;

/// Process-wide mapping from API key to tenant identity.
///
/// Built once from the static tenant list at startup and read-only
/// afterwards; there is no runtime mutation path.
pub(crate) struct TenantRegistry {
    by_key: HashMap<String, TenantIdentity>,
}

impl TenantRegistry {
    pub fn from_config(tenants: &BTreeMap<String, TenantConfig>) -> Self {
        let by_key = tenants
            .iter()
            .map(|(id, tenant)| {
                let identity = TenantIdentity {
                    id: id.clone(),
                    display_name: tenant.display_name.clone(),
                };

                (tenant.api_key.clone(), identity)
            })
            .collect();

        Self { by_key }
    }

    /// Look up the tenant owning the given API key.
    pub fn resolve(&self, api_key: &str) -> Option<&TenantIdentity> {
        self.by_key.get(api_key)
    }
}
