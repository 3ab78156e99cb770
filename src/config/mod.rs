//! Application configuration loaded from environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Which push transport the relay delivers through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Firebase Cloud Messaging HTTP v1.
    Fcm,
    /// Dry run: log the payload, deliver nothing.
    Log,
}

impl FromStr for TransportKind {
    type Err = ConfigLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcm" => Ok(TransportKind::Fcm),
            "log" => Ok(TransportKind::Log),
            other => Err(ConfigLoadError::InvalidTransport(other.to_string())),
        }
    }
}

/// Application configuration loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g. `0.0.0.0:3000`).
    pub server_addr: SocketAddr,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Push transport selection (`PUSH_TRANSPORT`).
    pub transport: TransportKind,
    /// Service-account key file for FCM.
    pub credentials_path: Option<PathBuf>,
    /// Firebase project id; falls back to the key's `project_id`.
    pub fcm_project_id: Option<String>,
    /// Base URL of the FCM API.
    pub fcm_endpoint: String,
}

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let server_addr = std::env::var("SERVER_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let server_addr: SocketAddr = server_addr
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr)?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let transport: TransportKind = std::env::var("PUSH_TRANSPORT")
            .unwrap_or_else(|_| "fcm".to_string())
            .parse()?;
        let credentials_path = non_empty_var("GOOGLE_APPLICATION_CREDENTIALS").map(PathBuf::from);
        let fcm_project_id = non_empty_var("FCM_PROJECT_ID");
        let fcm_endpoint = std::env::var("FCM_ENDPOINT")
            .unwrap_or_else(|_| "https://fcm.googleapis.com".to_string());

        if transport == TransportKind::Fcm && credentials_path.is_none() {
            return Err(ConfigLoadError::MissingVar("GOOGLE_APPLICATION_CREDENTIALS"));
        }

        Ok(Self {
            server_addr,
            log_level,
            transport,
            credentials_path,
            fcm_project_id,
            fcm_endpoint,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid SERVER_ADDR")]
    InvalidServerAddr,
    #[error("Invalid PUSH_TRANSPORT: {0} (expected `fcm` or `log`)")]
    InvalidTransport(String),
    #[error("{0} must be set")]
    MissingVar(&'static str),
}
