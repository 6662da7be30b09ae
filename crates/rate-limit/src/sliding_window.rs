use std::{collections::VecDeque, time::Duration};

use config::PerTenantRateLimitConfig;
use dashmap::DashMap;
use tokio::time::Instant;

use crate::RateLimitError;

/// Sliding-window request limiter keyed by tenant id.
///
/// Each tenant owns an ordered log of admission instants. A request is
/// admitted when fewer than `limit` admissions fall within the trailing
/// `interval`; the admission itself is recorded in the same step. Tenant
/// entries are created lazily on first use and live for the process
/// lifetime, which is acceptable because the tenant set is closed under
/// configuration.
pub struct RateLimitManager {
    limit: usize,
    interval: Duration,
    windows: DashMap<String, VecDeque<Instant>>,
}

impl RateLimitManager {
    pub fn new(config: &PerTenantRateLimitConfig) -> Self {
        Self {
            limit: config.limit as usize,
            interval: config.interval,
            windows: DashMap::new(),
        }
    }

    /// Admit or reject a request for the given tenant at the current time.
    ///
    /// The clock is read exactly once, before the window is inspected.
    pub fn check_request(&self, tenant_id: &str) -> Result<(), RateLimitError> {
        self.check_request_at(tenant_id, Instant::now())
    }

    /// Admit or reject a request for the given tenant at an explicit time.
    ///
    /// The trim, count check and append run under the tenant's exclusive map
    /// entry guard, so two concurrent requests for the same tenant can never
    /// both claim the last remaining slot, and two concurrent first requests
    /// for a new tenant both land in the same window. Requests for different
    /// tenants proceed independently.
    pub fn check_request_at(&self, tenant_id: &str, now: Instant) -> Result<(), RateLimitError> {
        let mut window = self.windows.entry(tenant_id.to_owned()).or_default();

        // Admissions are appended in order, so expired entries form a prefix.
        while let Some(oldest) = window.front() {
            if now.duration_since(*oldest) >= self.interval {
                window.pop_front();
            } else {
                break;
            }
        }

        if window.len() < self.limit {
            window.push_back(now);
            return Ok(());
        }

        let retry_after = match window.front() {
            Some(oldest) => self.interval.saturating_sub(now.duration_since(*oldest)),
            None => self.interval,
        };

        Err(RateLimitError::Exceeded { retry_after })
    }
}
