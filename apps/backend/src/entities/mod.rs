pub mod claim_definitions;
pub mod user_claims;
pub mod users;

pub use claim_definitions::Entity as ClaimDefinitions;
pub use claim_definitions::Model as ClaimDefinition;
pub use user_claims::Entity as UserClaims;
pub use user_claims::Model as UserClaim;
pub use users::Entity as Users;
pub use users::Model as User;
