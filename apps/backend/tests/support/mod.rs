#![allow(dead_code)]

pub mod app_builder;
pub mod factory;
pub mod test_state;

pub use app_builder::create_test_app;
pub use factory::{seed_catalog_entry, seed_user};
pub use test_state::{build_memory_state, build_test_state, test_security};
