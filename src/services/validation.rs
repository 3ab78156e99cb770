//! Request validation: method check, body decoding, required-field check.

use axum::http::Method;
use tracing::debug;
use validator::Validate;

use crate::error::ValidationFailure;
use crate::models::call::{CallSignalBody, CallSignalRequest, RequiredField};

/// Validate a raw inbound request. No external calls happen here.
///
/// `body` is `Err` when the body could not be buffered (e.g. over the size
/// limit). The method is checked first, so a non-POST is rejected whatever
/// its body.
pub fn validate_request(
    method: &Method,
    body: Result<&[u8], &str>,
) -> Result<CallSignalRequest, ValidationFailure> {
    if method != Method::POST {
        debug!(method = %method, "rejected: method not allowed");
        return Err(ValidationFailure::MethodNotAllowed(method.clone()));
    }

    let body = body.map_err(|reason| {
        debug!(reason = %reason, "rejected: body not readable");
        ValidationFailure::MalformedBody(reason.to_string())
    })?;
    let body: CallSignalBody = serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "rejected: malformed body");
        ValidationFailure::MalformedBody(e.to_string())
    })?;

    validate_body(body)
}

/// Check required fields on an already decoded body.
pub fn validate_body(body: CallSignalBody) -> Result<CallSignalRequest, ValidationFailure> {
    if let Err(errors) = body.validate() {
        let fields = errors.field_errors();
        let missing: Vec<RequiredField> = RequiredField::ALL
            .into_iter()
            .filter(|f| fields.contains_key(f.field_name()))
            .collect();
        debug!(errors = %errors, "rejected: required fields missing");
        return Err(ValidationFailure::MissingFields(missing));
    }

    let (Some(device_token), Some(caller_id), Some(channel_id)) =
        (body.fcm_token, body.caller_id, body.channel_id)
    else {
        return Err(ValidationFailure::MissingFields(RequiredField::ALL.to_vec()));
    };
    Ok(CallSignalRequest {
        device_token,
        caller_id,
        channel_id,
        call_session_id: body.callkit_id.filter(|id| !id.is_empty()),
    })
}
