//! Call notification dispatcher: validate, build, deliver, report.

use axum::http::Method;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::RelayResult;
use crate::models::payload::TransportReceipt;
use crate::services::delivery::deliver;
use crate::services::payload::build_payload;
use crate::services::validation::validate_request;
use crate::transport::PushTransport;

/// Stateless per-request pipeline around an injected transport.
#[derive(Clone)]
pub struct CallDispatcher {
    transport: Arc<dyn PushTransport>,
}

impl CallDispatcher {
    pub fn new(transport: Arc<dyn PushTransport>) -> Self {
        Self { transport }
    }

    /// Run one inbound request through the pipeline.
    ///
    /// `body` is `Err` with the reason when it could not be buffered.
    /// Invalid requests return before the transport is touched.
    #[instrument(skip_all, fields(method = %method))]
    pub async fn dispatch(
        &self,
        method: &Method,
        body: Result<&[u8], &str>,
    ) -> RelayResult<TransportReceipt> {
        let request = validate_request(method, body)?;
        info!(
            caller_id = %request.caller_id,
            channel_id = %request.channel_id,
            token = %request.token_hint(),
            "relaying call signal"
        );
        let payload = build_payload(&request);
        let receipt = deliver(self.transport.as_ref(), &payload)
            .await
            .into_result()?;
        Ok(receipt)
    }
}
