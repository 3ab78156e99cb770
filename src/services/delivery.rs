//! Delivery invoker: exactly one transport call per payload.

use tracing::{info, warn};

use crate::models::payload::{DeliveryOutcome, DeliveryPayload};
use crate::transport::PushTransport;

/// Hand the payload to the transport once. No retry, no timeout.
pub async fn deliver(transport: &dyn PushTransport, payload: &DeliveryPayload) -> DeliveryOutcome {
    let outcome = DeliveryOutcome::from(transport.send(payload).await);
    match &outcome {
        DeliveryOutcome::Delivered(receipt) => {
            info!(receipt = %receipt.as_str(), "call notification delivered");
        }
        DeliveryOutcome::Failed(e) => {
            warn!(kind = %e.kind, error = %e.message, "call notification delivery failed");
        }
    }
    outcome
}
