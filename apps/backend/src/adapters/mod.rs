//! SeaORM adapters. Functions here return `DbErr`; the repos layer maps to `DomainError`.

pub mod claims_sea;
pub mod users_sea;
