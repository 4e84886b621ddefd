use std::sync::Arc;

use backend_test_support::tokens::{TEST_AUDIENCE, TEST_ISSUER, TEST_SECRET};
use claims_api::infra::state::build_state;
use claims_api::repos::memory::{InMemoryClaimCatalog, InMemoryUserDirectory};
use claims_api::state::app_state::AppState;
use claims_api::state::security_config::SecurityConfig;

/// Security settings matching the tokens minted by `backend_test_support::tokens`.
pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_ISSUER, TEST_AUDIENCE, TEST_SECRET)
}

/// Fresh in-memory SQLite database, migrated, with SeaORM-backed stores.
pub async fn build_test_state() -> AppState {
    build_state(test_security())
        .with_db_url("sqlite::memory:")
        .build()
        .await
        .expect("build sqlite test state")
}

/// No database; in-memory stores only.
pub async fn build_memory_state() -> AppState {
    build_state(test_security())
        .with_stores(
            Arc::new(InMemoryClaimCatalog::new()),
            Arc::new(InMemoryUserDirectory::new()),
        )
        .build()
        .await
        .expect("build memory test state")
}
