//! HTTP middleware: request accounting and rate limiting

pub mod panic;
pub mod rate_limit;
pub mod request_metrics;

pub use panic::panic_response;
pub use rate_limit::{rate_limit, RequestRateLimiter};
pub use request_metrics::track_requests;
