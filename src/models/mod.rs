//! Data models for inbound call signals and outbound deliveries.

pub mod call;
pub mod payload;

pub use call::*;
pub use payload::*;
