//! API request and response models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::jobs::JobRecord;
use crate::telemetry::TelemetrySnapshot;

/// Automation figure advertised by the public endpoints
pub const AUTOMATION_BADGE: &str = "98%";

/// Routes listed in the 404 response
pub const AVAILABLE_ENDPOINTS: &[&str] = &[
    "/",
    "/api/health",
    "/api/status",
    "/api/metrics",
    "/api/webhook/automation",
    "/api/cron/hourly-automation",
    "/api/cron/daily-automation",
    "/api/cron/weekly-briefing",
    "/api/jobs",
    "/api/jobs/{id}",
    "/ping",
    "/swagger-ui",
    "/api-docs/openapi.json",
];

/// Landing page payload
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
    pub automation_level: String,
    pub manual_intervention: String,
    pub revenue_target: String,
    pub roi: String,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            message: "AI Empire - 98% Automated Business System".to_string(),
            status: "operational".to_string(),
            automation_level: AUTOMATION_BADGE.to_string(),
            manual_intervention: "2% (30 min/week)".to_string(),
            revenue_target: "$25,000/month".to_string(),
            roi: "197x".to_string(),
        }
    }
}

/// Health check response. Field order is part of the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub automation: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            automation: AUTOMATION_BADGE.to_string(),
        }
    }
}

/// Which third-party credentials are present
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ApisConfigured {
    pub openai: bool,
    pub apollo: bool,
    pub calendly: bool,
    pub linkedin: bool,
    pub stripe: bool,
}

/// Automation switches as currently configured
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct AutomationSummary {
    pub daily_revenue_target: f64,
    pub auto_respond_emails: bool,
    pub auto_book_meetings: bool,
    pub auto_send_proposals: bool,
}

/// Configuration status response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct StatusResponse {
    pub system: String,
    pub automation_level: String,
    pub environment: String,
    pub apis_configured: ApisConfigured,
    pub automation: AutomationSummary,
    /// `ready` once an OpenAI key is present, otherwise `configuration_needed`
    pub status: String,
}

/// Metrics response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MetricsResponse {
    pub metrics: TelemetrySnapshot,
    pub last_updated: DateTime<Utc>,
    pub status: String,
}

/// Optional webhook payload
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct WebhookRequest {
    /// Free-form name of the upstream event, stored on the job
    #[serde(default)]
    pub event: Option<String>,
}

/// Webhook acknowledgement
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct WebhookResponse {
    pub status: String,
    pub tasks: Vec<String>,
    pub automation_level: String,
    pub job_id: Uuid,
}

/// Cron trigger acknowledgement
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CronResponse {
    pub status: String,
    pub job_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct JobListResponse {
    pub jobs: Vec<JobRecord>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PingResponse {
    pub ping: String,
}

/// Body of the 404 fallback
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NotFoundResponse {
    pub message: String,
    pub available_endpoints: Vec<String>,
}

impl Default for NotFoundResponse {
    fn default() -> Self {
        Self {
            message: "Endpoint not found".to_string(),
            available_endpoints: AVAILABLE_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
