use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// The tenant's quota for the current window is used up. The request can
    /// be retried once `retry_after` has elapsed.
    #[error("rate limit exceeded, retry after {retry_after:?}")]
    Exceeded { retry_after: Duration },
}
