/// A single tenant in the static tenant list.
///
/// Tenants are keyed by their id in the `[tenants.<id>]` table and cannot be
/// added or removed at runtime.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TenantConfig {
    /// The API key clients send in the `x-api-key` header.
    pub api_key: String,
    /// Human-readable name used in logs and tooling.
    pub display_name: String,
}
