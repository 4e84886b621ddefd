//! Orchestration over the store capabilities. HTTP-agnostic.

pub mod catalog;
pub mod user_claims;
