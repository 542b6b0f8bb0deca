//! Background execution of queued jobs

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::{JobKind, JobLedger, JobRecord, JobStatus, StepStatus};
use crate::config::Capabilities;
use crate::telemetry::Telemetry;

/// Queues jobs in the ledger and runs them on the tokio runtime
pub struct JobDispatcher {
    ledger: Arc<JobLedger>,
    telemetry: Arc<Telemetry>,
}

impl JobDispatcher {
    pub fn new(ledger: Arc<JobLedger>, telemetry: Arc<Telemetry>) -> Self {
        Self { ledger, telemetry }
    }

    pub fn ledger(&self) -> &Arc<JobLedger> {
        &self.ledger
    }

    /// Record a job and start it in the background.
    ///
    /// Must be called from within a tokio runtime. Returns the record as it
    /// was queued; poll the ledger for progress.
    pub fn dispatch(
        &self,
        kind: JobKind,
        trigger: Option<String>,
        capabilities: Capabilities,
    ) -> JobRecord {
        let record = JobRecord::new(kind, trigger);
        let id = record.id;

        self.ledger.insert(record.clone());
        self.telemetry.record_job_dispatched();
        info!(job_id = %id, kind = %kind, "Job queued");

        let ledger = self.ledger.clone();
        let telemetry = self.telemetry.clone();
        tokio::spawn(
            run_job(ledger, telemetry, id, kind, capabilities)
                .instrument(info_span!("job", job_id = %id, kind = %kind)),
        );

        record
    }
}

async fn run_job(
    ledger: Arc<JobLedger>,
    telemetry: Arc<Telemetry>,
    id: Uuid,
    kind: JobKind,
    capabilities: Capabilities,
) {
    ledger.update(&id, |r| r.status = JobStatus::Running);

    let mut skipped = 0u64;
    for step in kind.steps() {
        let outcome = step.evaluate(&capabilities);

        match outcome.status {
            StepStatus::Dispatched => info!(step = %step, "Step dispatched"),
            StepStatus::Skipped => {
                skipped += 1;
                warn!(
                    step = %step,
                    reason = outcome.reason.as_deref().unwrap_or_default(),
                    "Step skipped"
                );
            }
        }

        ledger.update(&id, |r| r.steps.push(outcome));
        tokio::task::yield_now().await;
    }

    // Counters first so a completed record always has its totals visible
    telemetry.record_job_completed(skipped);

    let retained = ledger.update(&id, |r| {
        r.status = JobStatus::Completed;
        r.finished_at = Some(Utc::now());
    });
    if !retained {
        warn!("Job evicted from ledger before completion");
    }

    info!(skipped_steps = skipped, "Job completed");
}
