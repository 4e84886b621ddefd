//! Domain types shared by the catalog, the directory, and the HTTP layer.

pub mod claim;

pub use claim::Claim;
