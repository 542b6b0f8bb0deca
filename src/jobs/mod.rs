//! Automation triggers: job kinds, their steps, and the in-memory ledger
//!
//! A trigger (webhook or cron call) becomes a [`JobRecord`]. The dispatcher
//! runs each step's readiness check in a background task and records the
//! outcome; nothing here talks to third-party services.

pub mod dispatcher;
pub mod ledger;

pub use dispatcher::JobDispatcher;
pub use ledger::JobLedger;

use crate::config::Capabilities;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// What caused a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Webhook,
    Hourly,
    Daily,
    WeeklyBriefing,
}

impl JobKind {
    /// Steps run for this kind, in order
    pub fn steps(&self) -> &'static [JobStep] {
        match self {
            JobKind::Webhook => &[
                JobStep::LeadGeneration,
                JobStep::ContentPipeline,
                JobStep::RevenueCycle,
                JobStep::ClientManagement,
            ],
            JobKind::Hourly => &[JobStep::LeadGeneration, JobStep::ClientManagement],
            JobKind::Daily => &[
                JobStep::RevenueCycle,
                JobStep::ContentPipeline,
                JobStep::OpportunityHunting,
            ],
            JobKind::WeeklyBriefing => &[JobStep::StrategicBriefing],
        }
    }

    /// Status line returned to the caller that queued the job
    pub fn accepted_message(&self) -> &'static str {
        match self {
            JobKind::Webhook => "automation_triggered",
            JobKind::Hourly => "Hourly automation started",
            JobKind::Daily => "Daily automation started",
            JobKind::WeeklyBriefing => "Weekly briefing generated",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::Webhook => write!(f, "webhook"),
            JobKind::Hourly => write!(f, "hourly"),
            JobKind::Daily => write!(f, "daily"),
            JobKind::WeeklyBriefing => write!(f, "weekly_briefing"),
        }
    }
}

/// A unit of automation work within a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobStep {
    LeadGeneration,
    ContentPipeline,
    RevenueCycle,
    ClientManagement,
    OpportunityHunting,
    StrategicBriefing,
}

impl JobStep {
    pub fn trigger_message(&self) -> &'static str {
        match self {
            JobStep::LeadGeneration => "Lead generation initiated",
            JobStep::ContentPipeline => "Content creation scheduled",
            JobStep::RevenueCycle => "Revenue optimization active",
            JobStep::ClientManagement => "Client management running",
            JobStep::OpportunityHunting => "Opportunity hunting started",
            JobStep::StrategicBriefing => "Strategic briefing queued",
        }
    }

    /// Decide whether the step can be handed off, given what is configured
    pub fn evaluate(&self, capabilities: &Capabilities) -> StepOutcome {
        let missing = match self {
            JobStep::LeadGeneration => (!capabilities.apollo && !capabilities.linkedin)
                .then_some("no lead source configured (APOLLO_API_KEY or LINKEDIN_ACCESS_TOKEN)"),
            JobStep::ContentPipeline
            | JobStep::OpportunityHunting
            | JobStep::StrategicBriefing => {
                (!capabilities.openai).then_some("OPENAI_API_KEY not configured")
            }
            JobStep::RevenueCycle => {
                (!capabilities.stripe).then_some("STRIPE_API_KEY not configured")
            }
            JobStep::ClientManagement => (!capabilities.auto_respond_emails
                && !capabilities.auto_book_meetings
                && !capabilities.auto_send_proposals)
                .then_some("all client automation switches are off"),
        };

        match missing {
            None => StepOutcome {
                step: *self,
                status: StepStatus::Dispatched,
                reason: None,
            },
            Some(reason) => StepOutcome {
                step: *self,
                status: StepStatus::Skipped,
                reason: Some(reason.to_string()),
            },
        }
    }
}

impl fmt::Display for JobStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobStep::LeadGeneration => "lead_generation",
            JobStep::ContentPipeline => "content_pipeline",
            JobStep::RevenueCycle => "revenue_cycle",
            JobStep::ClientManagement => "client_management",
            JobStep::OpportunityHunting => "opportunity_hunting",
            JobStep::StrategicBriefing => "strategic_briefing",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Dispatched,
    Skipped,
}

/// Result of one step's readiness check
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct StepOutcome {
    pub step: JobStep,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Job lifecycle: queued, then running, then completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
}

/// A queued or finished job
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct JobRecord {
    pub id: Uuid,
    pub kind: JobKind,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    pub steps: Vec<StepOutcome>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    pub fn new(kind: JobKind, trigger: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            status: JobStatus::Queued,
            trigger,
            steps: Vec::with_capacity(kind.steps().len()),
            created_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == JobStatus::Completed
    }
}
