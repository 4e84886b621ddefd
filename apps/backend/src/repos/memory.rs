//! In-memory stores with the same observable semantics as the SeaORM ones.
//! Used by unit and route tests that don't need a database.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::claim_catalog::{ClaimCatalog, ClaimDefinition};
use super::user_directory::{validate_claim, User, UserDirectory};
use crate::domain::Claim;
use crate::errors::domain::DomainError;

#[derive(Debug, Default)]
pub struct InMemoryClaimCatalog {
    rows: Mutex<Vec<ClaimDefinition>>,
}

impl InMemoryClaimCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClaimCatalog for InMemoryClaimCatalog {
    async fn create(&self, claim: &Claim) -> Result<ClaimDefinition, DomainError> {
        let mut rows = self.rows.lock();
        let id = rows.last().map(|row| row.id + 1).unwrap_or(1);
        let definition = ClaimDefinition {
            id,
            claim_type: claim.claim_type.clone(),
            claim_value: claim.claim_value.clone(),
        };
        rows.push(definition.clone());
        Ok(definition)
    }

    async fn list(&self) -> Result<Vec<ClaimDefinition>, DomainError> {
        Ok(self.rows.lock().clone())
    }

    async fn find(&self, claim: &Claim) -> Result<Option<ClaimDefinition>, DomainError> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|row| claim.matches(&row.claim_type, &row.claim_value))
            .cloned())
    }
}

#[derive(Debug, Default)]
struct DirectoryState {
    users: HashMap<String, User>,
    claims: HashMap<String, Vec<Claim>>,
}

#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    state: Mutex<DirectoryState>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user so lookups resolve.
    pub fn insert_user(&self, user_id: impl Into<String>) -> User {
        let user = User {
            id: user_id.into(),
            user_name: None,
            email: None,
            created_at: time::OffsetDateTime::now_utc(),
        };
        self.state
            .lock()
            .users
            .insert(user.id.clone(), user.clone());
        user
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, DomainError> {
        Ok(self.state.lock().users.get(user_id).cloned())
    }

    async fn list_claims(&self, user: &User) -> Result<Vec<Claim>, DomainError> {
        Ok(self
            .state
            .lock()
            .claims
            .get(&user.id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_claim(&self, user: &User, claim: &Claim) -> Result<(), DomainError> {
        validate_claim(claim)?;
        let mut state = self.state.lock();
        let held = state.claims.entry(user.id.clone()).or_default();
        if !held.contains(claim) {
            held.push(claim.clone());
        }
        Ok(())
    }

    async fn remove_claim(&self, user: &User, claim: &Claim) -> Result<(), DomainError> {
        validate_claim(claim)?;
        if let Some(held) = self.state.lock().claims.get_mut(&user.id) {
            held.retain(|c| c != claim);
        }
        Ok(())
    }
}
