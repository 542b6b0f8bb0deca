//! Turns handler panics into the generic 500 response

use axum::response::{IntoResponse, Response};
use std::any::Any;

use crate::error::AppError;

/// Response used by `CatchPanicLayer` when a handler panics
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}
