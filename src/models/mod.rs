//! Data models for users and their candidate records.

pub mod candidate;
pub mod user;

pub use candidate::*;
pub use user::*;
