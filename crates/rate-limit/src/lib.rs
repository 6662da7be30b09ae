//! Per-tenant request admission control.
//!
//! Implements a sliding-window limiter: a tenant may have at most `limit`
//! admitted requests within any trailing `interval`, measured from the
//! moment of the admission check.

mod error;
mod sliding_window;

pub use error::RateLimitError;
pub use sliding_window::RateLimitManager;
