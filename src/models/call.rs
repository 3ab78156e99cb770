//! Inbound call-signal request: raw wire body and its validated form.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Session id used when the caller does not correlate the push to a call attempt.
pub const UNKNOWN_CALL_SESSION_ID: &str = "unknown_callkit_id";

/// Body of `POST /sendCallNotification` as it arrives on the wire.
///
/// Every field is optional here; presence is decided by [`Validate`] so that an
/// absent field and an empty string are rejected the same way.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CallSignalBody {
    #[validate(required, length(min = 1))]
    pub fcm_token: Option<String>,
    #[validate(required, length(min = 1))]
    pub caller_id: Option<String>,
    #[validate(required, length(min = 1))]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub callkit_id: Option<String>,
}

/// A request that passed validation. Required fields are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSignalRequest {
    pub device_token: String,
    pub caller_id: String,
    pub channel_id: String,
    pub call_session_id: Option<String>,
}

impl CallSignalRequest {
    /// Session id to put on the wire, substituting the sentinel when absent.
    pub fn call_session_id_or_default(&self) -> &str {
        self.call_session_id
            .as_deref()
            .unwrap_or(UNKNOWN_CALL_SESSION_ID)
    }

    /// Token prefix safe to put in logs.
    pub fn token_hint(&self) -> &str {
        let end = self
            .device_token
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.device_token.len());
        &self.device_token[..end]
    }
}

/// Required body fields, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    FcmToken,
    CallerId,
    ChannelId,
}

impl RequiredField {
    pub const ALL: [RequiredField; 3] = [
        RequiredField::FcmToken,
        RequiredField::CallerId,
        RequiredField::ChannelId,
    ];

    /// Name as it appears in the JSON body.
    pub fn wire_name(&self) -> &'static str {
        match self {
            RequiredField::FcmToken => "fcmToken",
            RequiredField::CallerId => "callerId",
            RequiredField::ChannelId => "channelId",
        }
    }

    /// Name of the struct field, as reported by `validator`.
    pub fn field_name(&self) -> &'static str {
        match self {
            RequiredField::FcmToken => "fcm_token",
            RequiredField::CallerId => "caller_id",
            RequiredField::ChannelId => "channel_id",
        }
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}
