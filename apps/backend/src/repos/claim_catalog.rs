//! Claim catalog: the whitelist of `(type, value)` pairs users may hold.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::adapters::claims_sea::{self as claims_adapter, ClaimDefinitionCreate};
use crate::domain::Claim;
use crate::errors::domain::DomainError;

/// Catalog row as seen by the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimDefinition {
    pub id: i32,
    #[serde(rename = "type")]
    pub claim_type: String,
    #[serde(rename = "value")]
    pub claim_value: String,
}

#[async_trait]
pub trait ClaimCatalog: Send + Sync {
    /// Insert a definition. No duplicate check.
    async fn create(&self, claim: &Claim) -> Result<ClaimDefinition, DomainError>;

    /// Every definition in insertion order.
    async fn list(&self) -> Result<Vec<ClaimDefinition>, DomainError>;

    /// First definition matching the pair, if any.
    async fn find(&self, claim: &Claim) -> Result<Option<ClaimDefinition>, DomainError>;
}

/// Catalog backed by the `claim_definitions` table.
#[derive(Debug, Clone)]
pub struct SeaClaimCatalog {
    db: DatabaseConnection,
}

impl SeaClaimCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClaimCatalog for SeaClaimCatalog {
    async fn create(&self, claim: &Claim) -> Result<ClaimDefinition, DomainError> {
        let dto = ClaimDefinitionCreate::new(claim.claim_type.clone(), claim.claim_value.clone());
        let model = claims_adapter::create_definition(&self.db, dto).await?;
        Ok(ClaimDefinition::from(model))
    }

    async fn list(&self) -> Result<Vec<ClaimDefinition>, DomainError> {
        let models = claims_adapter::list_definitions(&self.db).await?;
        Ok(models.into_iter().map(ClaimDefinition::from).collect())
    }

    async fn find(&self, claim: &Claim) -> Result<Option<ClaimDefinition>, DomainError> {
        let model =
            claims_adapter::find_definition(&self.db, &claim.claim_type, &claim.claim_value)
                .await?;
        Ok(model.map(ClaimDefinition::from))
    }
}

impl From<crate::entities::claim_definitions::Model> for ClaimDefinition {
    fn from(model: crate::entities::claim_definitions::Model) -> Self {
        Self {
            id: model.id,
            claim_type: model.claim_type,
            claim_value: model.claim_value,
        }
    }
}
