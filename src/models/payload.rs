//! Outbound delivery payload and the outcome of one delivery attempt.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::DeliveryError;

pub const DATA_CALLER_ID: &str = "callerId";
pub const DATA_CHANNEL_ID: &str = "channelId";
pub const DATA_CALL_SESSION_ID: &str = "callSessionId";

/// Delivery priority hint passed to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Expedited delivery; call signaling is latency-sensitive.
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
        }
    }
}

/// Data-only push targeted at one device. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryPayload {
    target: String,
    data: BTreeMap<String, String>,
    priority: Priority,
}

impl DeliveryPayload {
    pub(crate) fn new(target: String, data: BTreeMap<String, String>, priority: Priority) -> Self {
        Self {
            target,
            data,
            priority,
        }
    }

    /// Device token to deliver to.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn data(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }
}

/// Opaque acknowledgement returned by the transport on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReceipt(pub String);

impl TransportReceipt {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Result of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered(TransportReceipt),
    Failed(DeliveryError),
}

impl DeliveryOutcome {
    pub fn into_result(self) -> Result<TransportReceipt, DeliveryError> {
        match self {
            DeliveryOutcome::Delivered(receipt) => Ok(receipt),
            DeliveryOutcome::Failed(err) => Err(err),
        }
    }
}

impl From<Result<TransportReceipt, DeliveryError>> for DeliveryOutcome {
    fn from(res: Result<TransportReceipt, DeliveryError>) -> Self {
        match res {
            Ok(receipt) => DeliveryOutcome::Delivered(receipt),
            Err(err) => DeliveryOutcome::Failed(err),
        }
    }
}
