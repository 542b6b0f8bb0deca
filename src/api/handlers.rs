//! HTTP request handlers

use crate::api::models::{
    ApisConfigured, AutomationSummary, CronResponse, HealthResponse, JobListResponse,
    MetricsResponse, NotFoundResponse, PingResponse, RootResponse, StatusResponse,
    WebhookRequest, WebhookResponse, AUTOMATION_BADGE,
};
use crate::error::AppError;
use crate::jobs::{JobKind, JobRecord};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Landing page with the static system banner
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "System banner", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse::default())
}

/// Health check endpoint. Never reads configuration.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/ping",
    tag = "Health",
    responses((status = 200, description = "Pong", body = PingResponse))
)]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        ping: "pong".to_string(),
    })
}

/// Configuration status
#[utoipa::path(
    get,
    path = "/api/status",
    tag = "Status",
    responses((status = 200, description = "Configured integrations and switches", body = StatusResponse))
)]
pub async fn system_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let config = state.settings.read().await;
    let caps = config.capabilities();

    let status = if caps.openai { "ready" } else { "configuration_needed" };
    debug!(status, environment = %config.environment, "Status check");

    Json(StatusResponse {
        system: "AI Empire Automation".to_string(),
        automation_level: config.automation.level.clone(),
        environment: config.environment.clone(),
        apis_configured: ApisConfigured {
            openai: caps.openai,
            apollo: caps.apollo,
            calendly: caps.calendly,
            linkedin: caps.linkedin,
            stripe: caps.stripe,
        },
        automation: AutomationSummary {
            daily_revenue_target: config.automation.daily_revenue_target,
            auto_respond_emails: caps.auto_respond_emails,
            auto_book_meetings: caps.auto_book_meetings,
            auto_send_proposals: caps.auto_send_proposals,
        },
        status: status.to_string(),
    })
}

/// Service counters
#[utoipa::path(
    get,
    path = "/api/metrics",
    tag = "Status",
    responses((status = 200, description = "Live service counters", body = MetricsResponse))
)]
pub async fn metrics(State(state): State<Arc<AppState>>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        metrics: state.telemetry.snapshot(),
        last_updated: Utc::now(),
        status: "operational".to_string(),
    })
}

/// Automation webhook. The body is optional; when present it must be JSON.
#[utoipa::path(
    post,
    path = "/api/webhook/automation",
    tag = "Automation",
    request_body(content = WebhookRequest, description = "Optional trigger details", content_type = "application/json"),
    responses(
        (status = 200, description = "Automation queued", body = WebhookResponse),
        (status = 400, description = "Body is not valid JSON"),
        (status = 429, description = "Rate limited")
    )
)]
pub async fn automation_webhook(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<WebhookResponse>, AppError> {
    let request: WebhookRequest = if body.iter().all(u8::is_ascii_whitespace) {
        WebhookRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::InvalidRequest(format!("Invalid webhook payload: {}", e)))?
    };

    info!(event = ?request.event, "Automation webhook triggered");
    state.telemetry.record_webhook();

    let capabilities = state.settings.read().await.capabilities();
    let kind = JobKind::Webhook;
    let record = state.jobs.dispatch(kind, request.event, capabilities);

    Ok(Json(WebhookResponse {
        status: kind.accepted_message().to_string(),
        tasks: kind
            .steps()
            .iter()
            .map(|step| step.trigger_message().to_string())
            .collect(),
        automation_level: AUTOMATION_BADGE.to_string(),
        job_id: record.id,
    }))
}

async fn trigger_cron(state: &AppState, kind: JobKind) -> Json<CronResponse> {
    info!(kind = %kind, "Cron trigger received");
    state.telemetry.record_cron();

    let capabilities = state.settings.read().await.capabilities();
    let record = state.jobs.dispatch(kind, None, capabilities);

    Json(CronResponse {
        status: kind.accepted_message().to_string(),
        job_id: record.id,
    })
}

/// Hourly cron: lead generation and client management
#[utoipa::path(
    post,
    path = "/api/cron/hourly-automation",
    tag = "Automation",
    responses((status = 200, description = "Hourly job queued", body = CronResponse))
)]
pub async fn hourly_automation(State(state): State<Arc<AppState>>) -> Json<CronResponse> {
    trigger_cron(&state, JobKind::Hourly).await
}

/// Daily cron: revenue, content and opportunity steps
#[utoipa::path(
    post,
    path = "/api/cron/daily-automation",
    tag = "Automation",
    responses((status = 200, description = "Daily job queued", body = CronResponse))
)]
pub async fn daily_automation(State(state): State<Arc<AppState>>) -> Json<CronResponse> {
    trigger_cron(&state, JobKind::Daily).await
}

/// Weekly cron: strategic briefing
#[utoipa::path(
    post,
    path = "/api/cron/weekly-briefing",
    tag = "Automation",
    responses((status = 200, description = "Weekly briefing queued", body = CronResponse))
)]
pub async fn weekly_briefing(State(state): State<Arc<AppState>>) -> Json<CronResponse> {
    trigger_cron(&state, JobKind::WeeklyBriefing).await
}

/// List retained jobs, newest first
#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "Automation",
    responses((status = 200, description = "Job history", body = JobListResponse))
)]
pub async fn list_jobs(State(state): State<Arc<AppState>>) -> Json<JobListResponse> {
    Json(JobListResponse {
        jobs: state.jobs.ledger().list(),
    })
}

/// Fetch a single job
#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    tag = "Automation",
    params(("id" = String, Path, description = "Job id (UUID)")),
    responses(
        (status = 200, description = "Job record", body = JobRecord),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Unknown or evicted job")
    )
)]
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JobRecord>, AppError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::InvalidRequest(format!("'{}' is not a valid job id", id)))?;

    state
        .jobs
        .ledger()
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job '{}' not found", id)))
}

/// Fallback for unknown routes
pub async fn not_found() -> (StatusCode, Json<NotFoundResponse>) {
    (StatusCode::NOT_FOUND, Json(NotFoundResponse::default()))
}
