//! Call-signaling push relay.
//!
//! Accepts an incoming-call description over HTTP and forwards it as a
//! data-only, high-priority push to the callee's device so the device's
//! native call UI can ring even when the app is in the background.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod transport;

pub use config::Config;
pub use error::{DeliveryError, DeliveryErrorKind, RelayError, ValidationFailure};
pub use handlers::http::AppState;
pub use services::CallDispatcher;
pub use transport::PushTransport;

use axum::routing::{any, get};
use handlers::http;
use tower_http::trace::TraceLayer;

/// Build the router (relay endpoint, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/sendCallNotification", any(http::send_call_notification))
        .route("/health", get(http::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
