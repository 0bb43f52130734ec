//! Middleware: bearer-token authentication for the protected API routes.

pub mod auth;

pub use auth::{require_auth, AuthUser};
