use tracing::info;

use crate::domain::Claim;
use crate::errors::domain::DomainError;
use crate::repos::claim_catalog::{ClaimCatalog, ClaimDefinition};

pub async fn create_definition(
    catalog: &dyn ClaimCatalog,
    claim: Claim,
) -> Result<ClaimDefinition, DomainError> {
    let definition = catalog.create(&claim).await?;
    info!(
        claim_id = definition.id,
        claim_type = %definition.claim_type,
        "claims.created"
    );
    Ok(definition)
}

pub async fn list_definitions(catalog: &dyn ClaimCatalog) -> Result<Vec<ClaimDefinition>, DomainError> {
    catalog.list().await
}
