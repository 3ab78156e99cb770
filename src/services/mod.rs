//! Relay pipeline stages: validation, payload building, delivery.

pub mod delivery;
pub mod dispatcher;
pub mod payload;
pub mod validation;

pub use dispatcher::CallDispatcher;
pub use payload::build_payload;
pub use validation::validate_request;
