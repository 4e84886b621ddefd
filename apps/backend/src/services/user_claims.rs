//! Attach, list, and detach claims on directory users.
//!
//! Attach requires the pair to be in the catalog; detach never consults it.

use tracing::{debug, info};

use crate::domain::Claim;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::claim_catalog::ClaimCatalog;
use crate::repos::user_directory::{User, UserDirectory};

async fn require_user(directory: &dyn UserDirectory, user_id: &str) -> Result<User, DomainError> {
    directory.find_user(user_id).await?.ok_or_else(|| {
        debug!(user_id = %user_id, "user_claims.user_not_found");
        DomainError::not_found(NotFoundKind::User, format!("User {user_id} not found"))
    })
}

pub async fn attach_claim(
    catalog: &dyn ClaimCatalog,
    directory: &dyn UserDirectory,
    user_id: &str,
    claim: Claim,
) -> Result<(), DomainError> {
    let user = require_user(directory, user_id).await?;

    if catalog.find(&claim).await?.is_none() {
        debug!(user_id = %user_id, claim_type = %claim.claim_type, "user_claims.claim_not_in_catalog");
        return Err(DomainError::not_found(
            NotFoundKind::ClaimDefinition,
            "Claim not found.",
        ));
    }

    directory.add_claim(&user, &claim).await?;
    info!(user_id = %user.id, claim_type = %claim.claim_type, "user_claims.attached");
    Ok(())
}

pub async fn list_user_claims(
    directory: &dyn UserDirectory,
    user_id: &str,
) -> Result<Vec<Claim>, DomainError> {
    let user = require_user(directory, user_id).await?;
    directory.list_claims(&user).await
}

pub async fn detach_claim(
    directory: &dyn UserDirectory,
    user_id: &str,
    claim: Claim,
) -> Result<(), DomainError> {
    let user = require_user(directory, user_id).await?;
    directory.remove_claim(&user, &claim).await?;
    info!(user_id = %user.id, claim_type = %claim.claim_type, "user_claims.removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::memory::{InMemoryClaimCatalog, InMemoryUserDirectory};

    async fn fixture() -> (InMemoryClaimCatalog, InMemoryUserDirectory) {
        let catalog = InMemoryClaimCatalog::new();
        let directory = InMemoryUserDirectory::new();
        directory.insert_user("42");
        catalog.create(&Claim::new("dept", "eng")).await.unwrap();
        (catalog, directory)
    }

    #[tokio::test]
    async fn attach_list_detach_scenario() {
        let (catalog, directory) = fixture().await;
        let claim = Claim::new("dept", "eng");

        attach_claim(&catalog, &directory, "42", claim.clone())
            .await
            .unwrap();
        assert_eq!(
            list_user_claims(&directory, "42").await.unwrap(),
            vec![claim.clone()]
        );

        detach_claim(&directory, "42", claim).await.unwrap();
        assert!(list_user_claims(&directory, "42").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn attach_unknown_claim_is_rejected_and_not_attached() {
        let (catalog, directory) = fixture().await;

        let err = attach_claim(&catalog, &directory, "42", Claim::new("dept", "ops"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound(NotFoundKind::ClaimDefinition, _)
        ));
        assert!(list_user_claims(&directory, "42").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn attach_to_missing_user_is_not_found_even_for_unknown_claim() {
        let (catalog, directory) = fixture().await;

        for claim in [Claim::new("dept", "eng"), Claim::new("nope", "nope")] {
            let err = attach_claim(&catalog, &directory, "missing", claim)
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::NotFound(NotFoundKind::User, _)));
        }
    }

    #[tokio::test]
    async fn attach_is_idempotent_in_directory() {
        let (catalog, directory) = fixture().await;
        let claim = Claim::new("dept", "eng");

        attach_claim(&catalog, &directory, "42", claim.clone())
            .await
            .unwrap();
        attach_claim(&catalog, &directory, "42", claim.clone())
            .await
            .unwrap();
        assert_eq!(
            list_user_claims(&directory, "42").await.unwrap(),
            vec![claim]
        );
    }

    #[tokio::test]
    async fn detach_skips_catalog_and_tolerates_absent_claim() {
        let (_catalog, directory) = fixture().await;
        detach_claim(&directory, "42", Claim::new("never", "defined"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn detach_missing_user_is_not_found() {
        let (_catalog, directory) = fixture().await;
        let err = detach_claim(&directory, "missing", Claim::new("dept", "eng"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::User, _)));
    }

    #[tokio::test]
    async fn directory_validation_surfaces_on_attach() {
        let (catalog, directory) = fixture().await;
        catalog.create(&Claim::new("", "blank")).await.unwrap();

        let err = attach_claim(&catalog, &directory, "42", Claim::new("", "blank"))
            .await
            .unwrap_err();
        match err {
            DomainError::Directory(errors) => assert_eq!(errors[0].code, "ClaimTypeRequired"),
            other => panic!("expected directory error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_missing_user_is_not_found() {
        let (_catalog, directory) = fixture().await;
        let err = list_user_claims(&directory, "missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::User, _)));
    }
}
