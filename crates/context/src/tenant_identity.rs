/// The tenant a request was authenticated as.
///
/// Inserted into the request extensions by the authentication layer once the
/// API key has been resolved, and read by the rate limiter and the API
/// handlers. Requests that never authenticated carry no identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantIdentity {
    /// Stable tenant identifier, unique across the deployment.
    pub id: String,
    /// Human-readable name used in logs and tooling.
    pub display_name: String,
}
