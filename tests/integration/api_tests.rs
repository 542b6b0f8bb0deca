//! API endpoint integration tests

use automation_gateway::{api::routes::create_router, config::Settings, AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.rate_limit.enabled = false;
    settings
}

async fn create_test_app(settings: Settings) -> Router {
    let state = Arc::new(AppState::new(settings));
    create_router(state).await.unwrap()
}

async fn send(app: Router, method: &str, uri: &str, body: Body) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = send(app, "GET", uri, Body::empty()).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_body_is_exact() {
    let app = create_test_app(create_test_settings()).await;
    let (status, bytes) = send(app, "GET", "/api/health", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"status":"healthy","automation":"98%"}"#
    );
}

#[tokio::test]
async fn test_root_banner() {
    let app = create_test_app(create_test_settings()).await;
    let (status, body) = get_json(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "operational");
    assert_eq!(body["automation_level"], "98%");
    assert_eq!(body["manual_intervention"], "2% (30 min/week)");
    assert_eq!(body["revenue_target"], "$25,000/month");
    assert_eq!(body["roi"], "197x");
}

#[tokio::test]
async fn test_ping() {
    let app = create_test_app(create_test_settings()).await;
    let (status, body) = get_json(app, "/ping").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "ping": "pong" }));
}

#[tokio::test]
async fn test_status_without_keys() {
    let app = create_test_app(create_test_settings()).await;
    let (status, body) = get_json(app, "/api/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "configuration_needed");
    assert_eq!(body["automation_level"], "98_percent");
    for api in ["openai", "apollo", "calendly", "linkedin", "stripe"] {
        assert_eq!(body["apis_configured"][api], false, "{api} should be unconfigured");
    }
}

#[tokio::test]
async fn test_status_ready_with_openai_key() {
    let mut settings = create_test_settings();
    settings.integrations.openai_api_key = Some("sk-test".to_string());
    settings.automation.auto_send_proposals = false;

    let app = create_test_app(settings).await;
    let (_, body) = get_json(app, "/api/status").await;

    assert_eq!(body["status"], "ready");
    assert_eq!(body["apis_configured"]["openai"], true);
    assert_eq!(body["apis_configured"]["stripe"], false);
    assert_eq!(body["automation"]["auto_send_proposals"], false);
    assert_eq!(body["automation"]["daily_revenue_target"], 1000.0);

    // The key itself never appears
    assert!(!body.to_string().contains("sk-test"));
}

#[tokio::test]
async fn test_metrics_shape() {
    let app = create_test_app(create_test_settings()).await;
    let (status, body) = get_json(app, "/api/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "operational");
    assert!(body["last_updated"].is_string());
    assert!(body["metrics"]["requests_total"].is_u64());
    assert!(body["metrics"]["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn test_webhook_without_body() {
    let app = create_test_app(create_test_settings()).await;
    let (status, bytes) = send(app, "POST", "/api/webhook/automation", Body::empty()).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "automation_triggered");
    assert_eq!(body["automation_level"], "98%");
    assert_eq!(
        body["tasks"],
        serde_json::json!([
            "Lead generation initiated",
            "Content creation scheduled",
            "Revenue optimization active",
            "Client management running"
        ])
    );
    assert!(uuid::Uuid::parse_str(body["job_id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_webhook_rejects_malformed_json() {
    let app = create_test_app(create_test_settings()).await;
    let (status, bytes) = send(
        app,
        "POST",
        "/api/webhook/automation",
        Body::from("{not json"),
    )
    .await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn test_cron_endpoints() {
    let cases = [
        ("/api/cron/hourly-automation", "Hourly automation started"),
        ("/api/cron/daily-automation", "Daily automation started"),
        ("/api/cron/weekly-briefing", "Weekly briefing generated"),
    ];

    for (uri, expected) in cases {
        let app = create_test_app(create_test_settings()).await;
        let (status, bytes) = send(app, "POST", uri, Body::empty()).await;
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["status"], expected);
        assert!(body["job_id"].is_string());
    }
}

#[tokio::test]
async fn test_cron_requires_post() {
    let app = create_test_app(create_test_settings()).await;
    let (status, _) = send(app, "GET", "/api/cron/daily-automation", Body::empty()).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route_lists_endpoints() {
    let app = create_test_app(create_test_settings()).await;
    let (status, body) = get_json(app, "/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Endpoint not found");
    let endpoints = body["available_endpoints"].as_array().unwrap();
    assert!(endpoints.iter().any(|e| e == "/api/health"));
    assert!(endpoints.iter().any(|e| e == "/api/webhook/automation"));
}

#[tokio::test]
async fn test_job_lookup_errors() {
    let app = create_test_app(create_test_settings()).await;
    let (status, body) = get_json(app, "/api/jobs/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");

    let app = create_test_app(create_test_settings()).await;
    let uri = format!("/api/jobs/{}", uuid::Uuid::new_v4());
    let (status, body) = get_json(app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = create_test_app(create_test_settings()).await;
    let (status, body) = get_json(app, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/health"].is_object());
    assert!(body["paths"]["/api/webhook/automation"].is_object());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = create_test_app(create_test_settings()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/health")
                .header("origin", "https://dashboard.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = create_test_app(create_test_settings()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/status")
                .header("origin", "https://dashboard.example.com")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "x-webhook-signature")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "*");
    assert_eq!(headers["access-control-allow-headers"], "*");
}

#[tokio::test]
async fn test_swagger_ui_served() {
    let app = create_test_app(create_test_settings()).await;
    let (status, bytes) = send(app, "GET", "/swagger-ui/", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&bytes).contains("swagger"));
}

#[tokio::test]
async fn test_unknown_route_lists_job_and_docs_routes() {
    let app = create_test_app(create_test_settings()).await;
    let (_, body) = get_json(app, "/missing").await;

    let endpoints = body["available_endpoints"].as_array().unwrap();
    for expected in ["/api/jobs/{id}", "/swagger-ui", "/api-docs/openapi.json"] {
        assert!(endpoints.iter().any(|e| e == expected), "{expected} not listed");
    }
}
