//! Store capabilities used by the HTTP layer.
//!
//! Each store is a trait so handlers can declare exactly what they touch;
//! the SeaORM implementations live next to the trait, in-memory ones in `memory`.

pub mod claim_catalog;
pub mod memory;
pub mod user_directory;

pub use claim_catalog::{ClaimCatalog, ClaimDefinition, SeaClaimCatalog};
pub use user_directory::{DirectoryError, SeaUserDirectory, User, UserDirectory};
