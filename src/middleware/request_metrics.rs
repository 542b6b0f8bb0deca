//! Counts every response that leaves the router

use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use std::sync::Arc;

use crate::telemetry::Telemetry;

pub async fn track_requests(
    State(telemetry): State<Arc<Telemetry>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    telemetry.record_request(response.status().is_server_error());
    response
}
