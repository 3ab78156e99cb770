//! Dry-run transport: logs what would be sent.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use super::PushTransport;
use crate::error::DeliveryError;
use crate::models::payload::{DeliveryPayload, TransportReceipt};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

#[async_trait]
impl PushTransport for LogTransport {
    async fn send(&self, payload: &DeliveryPayload) -> Result<TransportReceipt, DeliveryError> {
        info!(
            data = ?payload.data(),
            priority = payload.priority().as_str(),
            "dry run: call notification not sent"
        );
        Ok(TransportReceipt(format!(
            "dry-run/{}",
            Utc::now().timestamp_millis()
        )))
    }
}
