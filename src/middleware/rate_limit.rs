//! Global token-bucket rate limiting for the automation API

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::warn;

use crate::error::{AppError, Result};

/// Shared limiter; one bucket for all callers
pub struct RequestRateLimiter {
    limiter: DefaultDirectRateLimiter,
}

impl RequestRateLimiter {
    pub fn new(requests_per_second: u32, burst_size: u32) -> Result<Self> {
        let rps = NonZeroU32::new(requests_per_second).ok_or_else(|| {
            AppError::Config(config::ConfigError::Message(
                "requests_per_second must be positive".to_string(),
            ))
        })?;
        let burst = NonZeroU32::new(burst_size).ok_or_else(|| {
            AppError::Config(config::ConfigError::Message(
                "burst_size must be positive".to_string(),
            ))
        })?;

        Ok(Self {
            limiter: RateLimiter::direct(Quota::per_second(rps).allow_burst(burst)),
        })
    }

    /// Take one token. False when the bucket is empty.
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

pub async fn rate_limit(
    State(limiter): State<Arc<RequestRateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    if limiter.try_acquire() {
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Rate limit exceeded");
    AppError::RateLimited.into_response()
}
