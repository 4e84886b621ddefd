use claims_api::adapters::users_sea::UserCreate;
use claims_api::domain::Claim;
use claims_api::repos::claim_catalog::{ClaimCatalog, ClaimDefinition};
use claims_api::repos::user_directory::{create_user, User};
use claims_api::state::app_state::AppState;

/// Provision a directory user directly in the database.
pub async fn seed_user(state: &AppState, user_id: &str) -> User {
    let db = state.db.as_ref().expect("state has a database");
    create_user(db, UserCreate::new(user_id))
        .await
        .expect("seed user")
}

/// Add a catalog entry through the store, bypassing HTTP.
pub async fn seed_catalog_entry(
    state: &AppState,
    claim_type: &str,
    claim_value: &str,
) -> ClaimDefinition {
    state
        .catalog
        .create(&Claim::new(claim_type, claim_value))
        .await
        .expect("seed catalog entry")
}
