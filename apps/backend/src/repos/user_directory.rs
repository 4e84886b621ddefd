//! User directory: users and the claims attached to them.
//!
//! The directory owns its own validation. Failures come back as a list of
//! `DirectoryError`s which the HTTP layer passes through unchanged.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, SqlErr};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapters::users_sea::{self as users_adapter, UserClaimCreate, UserCreate};
use crate::domain::Claim;
use crate::errors::domain::DomainError;

/// Longest claim type or value the directory stores.
pub const MAX_CLAIM_PART_LEN: usize = 256;

/// Directory user. Only the id matters to this service.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub created_at: time::OffsetDateTime,
}

/// One reason the directory refused an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryError {
    pub code: String,
    pub description: String,
}

impl DirectoryError {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, DomainError>;

    /// Claims held by the user, in attachment order.
    async fn list_claims(&self, user: &User) -> Result<Vec<Claim>, DomainError>;

    /// Attach a claim. Attaching a claim the user already holds succeeds without a second row.
    async fn add_claim(&self, user: &User, claim: &Claim) -> Result<(), DomainError>;

    /// Remove every copy of a claim. Removing an absent claim succeeds.
    async fn remove_claim(&self, user: &User, claim: &Claim) -> Result<(), DomainError>;
}

/// The directory's own rules for a claim it is asked to store or remove.
pub fn validate_claim(claim: &Claim) -> Result<(), DomainError> {
    let mut errors = Vec::new();

    if claim.claim_type.trim().is_empty() {
        errors.push(DirectoryError::new(
            "ClaimTypeRequired",
            "Claim type is required.",
        ));
    } else if claim.claim_type.chars().count() > MAX_CLAIM_PART_LEN {
        errors.push(DirectoryError::new(
            "ClaimTypeTooLong",
            format!("Claim type must be at most {MAX_CLAIM_PART_LEN} characters."),
        ));
    }

    if claim.claim_value.chars().count() > MAX_CLAIM_PART_LEN {
        errors.push(DirectoryError::new(
            "ClaimValueTooLong",
            format!("Claim value must be at most {MAX_CLAIM_PART_LEN} characters."),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::directory(errors))
    }
}

/// Provision a directory user. Users never arrive over HTTP; this is for
/// seeding and tests.
pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<User, DomainError> {
    let user = users_adapter::create_user(conn, dto).await?;
    Ok(User::from(user))
}

/// Directory backed by the `users` and `user_claims` tables.
#[derive(Debug, Clone)]
pub struct SeaUserDirectory {
    db: DatabaseConnection,
}

impl SeaUserDirectory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for SeaUserDirectory {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, DomainError> {
        let user = users_adapter::find_user_by_id(&self.db, user_id).await?;
        Ok(user.map(User::from))
    }

    async fn list_claims(&self, user: &User) -> Result<Vec<Claim>, DomainError> {
        let rows = users_adapter::list_user_claims(&self.db, &user.id).await?;
        Ok(rows
            .into_iter()
            .map(|row| Claim::new(row.claim_type, row.claim_value))
            .collect())
    }

    async fn add_claim(&self, user: &User, claim: &Claim) -> Result<(), DomainError> {
        validate_claim(claim)?;

        let existing = users_adapter::find_user_claim(
            &self.db,
            &user.id,
            &claim.claim_type,
            &claim.claim_value,
        )
        .await?;
        if existing.is_some() {
            debug!(user_id = %user.id, claim_type = %claim.claim_type, "directory.claim_already_held");
            return Ok(());
        }

        let dto = UserClaimCreate::new(
            user.id.clone(),
            claim.claim_type.clone(),
            claim.claim_value.clone(),
        );
        match users_adapter::insert_user_claim(&self.db, dto).await {
            Ok(_) => Ok(()),
            // A concurrent attach of the same pair won the race.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!(user_id = %user.id, claim_type = %claim.claim_type, "directory.claim_already_held");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_claim(&self, user: &User, claim: &Claim) -> Result<(), DomainError> {
        validate_claim(claim)?;

        let removed = users_adapter::delete_user_claims(
            &self.db,
            &user.id,
            &claim.claim_type,
            &claim.claim_value,
        )
        .await?;
        debug!(user_id = %user.id, removed, "directory.claims_removed");
        Ok(())
    }
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            user_name: model.user_name,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_codes(result: Result<(), DomainError>) -> Vec<String> {
        match result {
            Err(DomainError::Directory(errors)) => errors.into_iter().map(|e| e.code).collect(),
            other => panic!("expected directory error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_ordinary_claim() {
        assert!(validate_claim(&Claim::new("dept", "eng")).is_ok());
    }

    #[test]
    fn accepts_empty_value() {
        assert!(validate_claim(&Claim::new("flag", "")).is_ok());
    }

    #[test]
    fn rejects_blank_type() {
        assert_eq!(
            directory_codes(validate_claim(&Claim::new("   ", "eng"))),
            vec!["ClaimTypeRequired"]
        );
    }

    #[test]
    fn reports_every_violation() {
        let long = "x".repeat(MAX_CLAIM_PART_LEN + 1);
        assert_eq!(
            directory_codes(validate_claim(&Claim::new(long.clone(), long))),
            vec!["ClaimTypeTooLong", "ClaimValueTooLong"]
        );
    }

    #[test]
    fn length_limit_counts_characters() {
        let exactly = "é".repeat(MAX_CLAIM_PART_LEN);
        assert!(validate_claim(&Claim::new("t", exactly)).is_ok());
    }
}
