//! HTTP request handlers.

pub mod candidates;
pub mod http;

pub use candidates::*;
pub use http::*;
