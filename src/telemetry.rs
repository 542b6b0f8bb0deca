//! Service counters backing the metrics endpoint

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use utoipa::ToSchema;

/// Atomic counters updated from middleware, handlers and job tasks
pub struct Telemetry {
    requests_total: AtomicU64,
    server_errors_total: AtomicU64,
    webhook_triggers: AtomicU64,
    cron_triggers: AtomicU64,
    jobs_dispatched: AtomicU64,
    jobs_completed: AtomicU64,
    steps_skipped: AtomicU64,
    started_at: Instant,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct TelemetrySnapshot {
    pub requests_total: u64,
    pub server_errors_total: u64,
    pub webhook_triggers: u64,
    pub cron_triggers: u64,
    pub jobs_dispatched: u64,
    pub jobs_completed: u64,
    pub steps_skipped: u64,
    pub uptime_seconds: u64,
}

impl Telemetry {
    pub fn new() -> Self {
        Self {
            requests_total: AtomicU64::new(0),
            server_errors_total: AtomicU64::new(0),
            webhook_triggers: AtomicU64::new(0),
            cron_triggers: AtomicU64::new(0),
            jobs_dispatched: AtomicU64::new(0),
            jobs_completed: AtomicU64::new(0),
            steps_skipped: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    pub fn record_request(&self, server_error: bool) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        if server_error {
            self.server_errors_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_webhook(&self) {
        self.webhook_triggers.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cron(&self) {
        self.cron_triggers.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_job_dispatched(&self) {
        self.jobs_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_job_completed(&self, skipped_steps: u64) {
        self.jobs_completed.fetch_add(1, Ordering::Relaxed);
        self.steps_skipped.fetch_add(skipped_steps, Ordering::Relaxed);
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            server_errors_total: self.server_errors_total.load(Ordering::Relaxed),
            webhook_triggers: self.webhook_triggers.load(Ordering::Relaxed),
            cron_triggers: self.cron_triggers.load(Ordering::Relaxed),
            jobs_dispatched: self.jobs_dispatched.load(Ordering::Relaxed),
            jobs_completed: self.jobs_completed.load(Ordering::Relaxed),
            steps_skipped: self.steps_skipped.load(Ordering::Relaxed),
            uptime_seconds: self.uptime_seconds(),
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}
