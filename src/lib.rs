//! Automation Gateway
//!
//! A small HTTP service exposing health, configuration status and metrics
//! endpoints, plus webhook and cron triggers that queue automation jobs.

pub mod api;
pub mod config;
pub mod error;
pub mod jobs;
pub mod middleware;
pub mod telemetry;

pub use error::{AppError, Result};

use std::sync::Arc;
use tokio::sync::RwLock;

use jobs::{JobDispatcher, JobLedger};
use telemetry::Telemetry;

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Arc<RwLock<config::Settings>>,
    pub jobs: Arc<JobDispatcher>,
    pub telemetry: Arc<Telemetry>,
}

impl AppState {
    /// Wire up the job ledger and counters for the given settings
    pub fn new(settings: config::Settings) -> Self {
        let telemetry = Arc::new(Telemetry::new());
        let ledger = Arc::new(JobLedger::new(settings.automation.job_history_limit));
        let jobs = Arc::new(JobDispatcher::new(ledger, telemetry.clone()));

        Self {
            settings: Arc::new(RwLock::new(settings)),
            jobs,
            telemetry,
        }
    }
}
