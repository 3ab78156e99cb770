//! Firebase Cloud Messaging HTTP v1 transport.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::{AccessTokenSource, PushTransport};
use crate::error::DeliveryError;
use crate::models::payload::{DeliveryPayload, Priority, TransportReceipt};

/// Sends data-only messages through `projects.messages.send`.
pub struct FcmTransport {
    http: reqwest::Client,
    tokens: AccessTokenSource,
    send_url: String,
}

impl FcmTransport {
    pub fn new(
        http: reqwest::Client,
        tokens: AccessTokenSource,
        endpoint: &str,
        project_id: &str,
    ) -> Self {
        Self {
            http,
            tokens,
            send_url: send_url(endpoint, project_id),
        }
    }
}

fn send_url(endpoint: &str, project_id: &str) -> String {
    format!(
        "{}/v1/projects/{}/messages:send",
        endpoint.trim_end_matches('/'),
        project_id
    )
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: Message<'a>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    token: &'a str,
    data: &'a BTreeMap<String, String>,
    android: AndroidConfig,
}

#[derive(Debug, Serialize)]
struct AndroidConfig {
    priority: &'static str,
}

impl<'a> SendRequest<'a> {
    fn from_payload(payload: &'a DeliveryPayload) -> Self {
        let priority = match payload.priority() {
            Priority::High => "HIGH",
        };
        Self {
            message: Message {
                token: payload.target(),
                data: payload.data(),
                android: AndroidConfig { priority },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Error text for a non-2xx answer: `"{status}: {message}"` from Google's
/// error envelope, or the raw body when it is not one.
fn rejection_detail(http_status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) => match (error.status, error.message) {
            (Some(status), Some(message)) => format!("{}: {}", status, message),
            (Some(status), None) => status,
            (None, Some(message)) => message,
            (None, None) => format!("HTTP {}: {}", http_status.as_u16(), body),
        },
        Err(_) => format!("HTTP {}: {}", http_status.as_u16(), body.trim()),
    }
}

#[async_trait]
impl PushTransport for FcmTransport {
    async fn send(&self, payload: &DeliveryPayload) -> Result<TransportReceipt, DeliveryError> {
        let bearer = self.tokens.token().await?;
        let resp = self
            .http
            .post(self.send_url.as_str())
            .bearer_auth(bearer)
            .json(&SendRequest::from_payload(payload))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            debug!(status = status.as_u16(), body = %body, "fcm rejected message");
            return Err(DeliveryError::rejected(rejection_detail(status, &body)));
        }

        let sent: SendResponse = resp.json().await?;
        Ok(TransportReceipt(sent.name))
    }
}
