//! Backend test support utilities
//!
//! Logging initialization, problem-details assertions, and bearer token
//! minting for the claims API test suites.

pub mod logging;
pub mod problem_details;
pub mod tokens;
