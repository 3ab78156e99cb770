//! HTTP handlers: call notification relay and health.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{Method, StatusCode},
    Json,
};
use serde_json::json;

use crate::error::{RelayError, BODY_SENT};
use crate::services::CallDispatcher;
use crate::transport::PushTransport;
use std::sync::Arc;

/// Shared application state. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: CallDispatcher,
}

impl AppState {
    pub fn new(transport: Arc<dyn PushTransport>) -> Self {
        Self {
            dispatcher: CallDispatcher::new(transport),
        }
    }

    pub fn dispatcher(&self) -> &CallDispatcher {
        &self.dispatcher
    }
}

/// `/sendCallNotification` — relay an incoming-call signal to the callee's device.
/// Routed for every method; only POST with a JSON body is accepted.
/// A body that fails to buffer is handed on as an error so the method check
/// still runs first and the response stays 405 or 400.
pub async fn send_call_notification(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, &'static str), RelayError> {
    let body = body.map_err(|e| e.body_text());
    state
        .dispatcher()
        .dispatch(&method, body.as_deref().map_err(String::as_str))
        .await?;
    Ok((StatusCode::OK, BODY_SENT))
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "callpush" })),
    )
}
