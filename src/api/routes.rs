//! HTTP route definitions

use crate::api::handlers;
use crate::api::models::*;
use crate::error::Result;
use crate::jobs::{JobKind, JobRecord, JobStatus, JobStep, StepOutcome, StepStatus};
use crate::middleware::{panic_response, rate_limit, track_requests, RequestRateLimiter};
use crate::telemetry::TelemetrySnapshot;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Automation Gateway API",
        description = "Health, status, metrics and automation trigger endpoints.",
        license(name = "MIT"),
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        handlers::root,
        handlers::health_check,
        handlers::ping,
        handlers::system_status,
        handlers::metrics,
        handlers::automation_webhook,
        handlers::hourly_automation,
        handlers::daily_automation,
        handlers::weekly_briefing,
        handlers::list_jobs,
        handlers::get_job,
    ),
    components(schemas(
        RootResponse,
        HealthResponse,
        PingResponse,
        StatusResponse,
        ApisConfigured,
        AutomationSummary,
        MetricsResponse,
        TelemetrySnapshot,
        WebhookRequest,
        WebhookResponse,
        CronResponse,
        JobListResponse,
        NotFoundResponse,
        JobRecord,
        JobKind,
        JobStatus,
        JobStep,
        StepOutcome,
        StepStatus,
    )),
    tags(
        (name = "Health", description = "Liveness and banner endpoints"),
        (name = "Status", description = "Configuration status and metrics"),
        (name = "Automation", description = "Webhook and cron triggers"),
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub async fn create_router(state: Arc<crate::AppState>) -> Result<Router> {
    // Get configuration for middleware
    let (rate_limit_enabled, rps, burst, timeout_secs) = {
        let config = state.settings.read().await;
        (
            config.rate_limit.enabled,
            config.rate_limit.requests_per_second,
            config.rate_limit.burst_size,
            config.server.request_timeout_secs,
        )
    };

    // Automation API, subject to rate limiting
    let api_routes = Router::new()
        .route("/api/status", get(handlers::system_status))
        .route("/api/metrics", get(handlers::metrics))
        .route("/api/webhook/automation", post(handlers::automation_webhook))
        .route("/api/cron/hourly-automation", post(handlers::hourly_automation))
        .route("/api/cron/daily-automation", post(handlers::daily_automation))
        .route("/api/cron/weekly-briefing", post(handlers::weekly_briefing))
        .route("/api/jobs", get(handlers::list_jobs))
        .route("/api/jobs/:id", get(handlers::get_job));

    let api_routes = if rate_limit_enabled {
        let limiter = Arc::new(RequestRateLimiter::new(rps, burst)?);
        api_routes.route_layer(middleware::from_fn_with_state(limiter, rate_limit))
    } else {
        api_routes
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        // Probes (never rate limited)
        .route("/", get(handlers::root))
        .route("/ping", get(handlers::ping))
        .route("/api/health", get(handlers::health_check))
        .merge(api_routes)
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(handlers::not_found)
        .with_state(state.clone())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::new(Duration::from_secs(timeout_secs)))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(
            state.telemetry.clone(),
            track_requests,
        ));

    Ok(router)
}
