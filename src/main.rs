//! Entry point: load config, build the push transport, and run the server.

use callpush::config::{Config, TransportKind};
use callpush::{create_app, transport, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let push = transport::from_config(&config)?;
    if config.transport == TransportKind::Log {
        tracing::warn!("PUSH_TRANSPORT=log: notifications are logged, not delivered");
    }

    let app = create_app(AppState::new(push));

    tracing::info!(addr = %config.server_addr, transport = ?config.transport, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
