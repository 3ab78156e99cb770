//! HTTP request handlers.

pub mod http;

pub use http::*;
