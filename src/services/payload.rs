//! Payload builder: validated request to data-only delivery payload.

use std::collections::BTreeMap;

use crate::models::call::CallSignalRequest;
use crate::models::payload::{
    DeliveryPayload, Priority, DATA_CALLER_ID, DATA_CALL_SESSION_ID, DATA_CHANNEL_ID,
};

/// Build the push for a validated request. Pure and deterministic.
///
/// No title or body is ever set: the device's call layer renders the call
/// from the data fields alone.
pub fn build_payload(req: &CallSignalRequest) -> DeliveryPayload {
    let mut data = BTreeMap::new();
    data.insert(DATA_CALLER_ID.to_string(), req.caller_id.clone());
    data.insert(DATA_CHANNEL_ID.to_string(), req.channel_id.clone());
    data.insert(
        DATA_CALL_SESSION_ID.to_string(),
        req.call_session_id_or_default().to_string(),
    );
    DeliveryPayload::new(req.device_token.clone(), data, Priority::High)
}
