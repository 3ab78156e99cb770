//! Relay error types and the mapping from outcome to HTTP response.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::call::RequiredField;

pub const BODY_METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
pub const BODY_MISSING_PARAMETERS: &str =
    "Missing parameters: fcmToken, callerId and channelId are required";
pub const BODY_SENT: &str = "Call notification sent";
const DELIVERY_FAILED_PREFIX: &str = "Error sending call notification";

/// Why an inbound request was rejected before delivery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<RequiredField>),

    #[error("malformed body: {0}")]
    MalformedBody(String),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(RequiredField::wire_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where a delivery attempt failed. Says nothing about why a token is bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryErrorKind {
    /// The transport answered and refused the message.
    Rejected,
    /// The transport could not be reached or did not answer.
    Unreachable,
    /// Authorization with the transport could not be obtained.
    Credentials,
    /// The transport answered with something we could not read.
    Protocol,
}

impl DeliveryErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryErrorKind::Rejected => "rejected",
            DeliveryErrorKind::Unreachable => "unreachable",
            DeliveryErrorKind::Credentials => "credentials",
            DeliveryErrorKind::Protocol => "protocol",
        }
    }
}

impl std::fmt::Display for DeliveryErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport failure: a kind plus the transport's own error text, unmodified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DeliveryError {
    pub kind: DeliveryErrorKind,
    pub message: String,
}

impl DeliveryError {
    pub fn new(kind: DeliveryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(DeliveryErrorKind::Rejected, message)
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::new(DeliveryErrorKind::Unreachable, message)
    }

    pub fn credentials(message: impl Into<String>) -> Self {
        Self::new(DeliveryErrorKind::Credentials, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(DeliveryErrorKind::Protocol, message)
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            DeliveryError::protocol(e.to_string())
        } else {
            DeliveryError::unreachable(e.to_string())
        }
    }
}

/// Request-scoped relay errors. None of them outlive the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl RelayError {
    /// Status and plain-text body for this error.
    pub fn status_and_body(&self) -> (StatusCode, String) {
        match self {
            RelayError::Validation(ValidationFailure::MethodNotAllowed(_)) => (
                StatusCode::METHOD_NOT_ALLOWED,
                BODY_METHOD_NOT_ALLOWED.to_string(),
            ),
            RelayError::Validation(_) => {
                (StatusCode::BAD_REQUEST, BODY_MISSING_PARAMETERS.to_string())
            }
            RelayError::Delivery(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{}: {}", DELIVERY_FAILED_PREFIX, e.message),
            ),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        self.status_and_body().into_response()
    }
}

pub type RelayResult<T> = Result<T, RelayError>;
