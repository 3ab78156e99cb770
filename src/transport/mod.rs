//! Push-delivery transports. The relay only sees [`PushTransport`].

pub mod credentials;
pub mod dry_run;
pub mod fcm;

pub use credentials::{AccessTokenSource, ServiceAccountKey};
pub use dry_run::LogTransport;
pub use fcm::FcmTransport;

use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{Config, TransportKind};
use crate::error::DeliveryError;
use crate::models::payload::{DeliveryPayload, TransportReceipt};

/// One-shot delivery of a payload to a device.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn send(&self, payload: &DeliveryPayload) -> Result<TransportReceipt, DeliveryError>;
}

/// Build the transport selected by `config`.
pub fn from_config(config: &Config) -> anyhow::Result<Arc<dyn PushTransport>> {
    match config.transport {
        TransportKind::Log => Ok(Arc::new(LogTransport)),
        TransportKind::Fcm => {
            let path = config
                .credentials_path
                .as_ref()
                .context("GOOGLE_APPLICATION_CREDENTIALS must be set for the fcm transport")?;
            let key = ServiceAccountKey::from_file(path)?;
            let project_id = config
                .fcm_project_id
                .clone()
                .or_else(|| key.project_id.clone())
                .context("FCM_PROJECT_ID not set and service-account key has no project_id")?;
            let http = reqwest::Client::builder()
                .build()
                .context("failed to build fcm http client")?;
            let tokens = AccessTokenSource::new(key, http.clone());
            Ok(Arc::new(FcmTransport::new(
                http,
                tokens,
                &config.fcm_endpoint,
                &project_id,
            )))
        }
    }
}
