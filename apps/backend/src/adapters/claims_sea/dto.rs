//! DTOs for claims_sea adapter.

/// DTO for inserting a catalog row.
#[derive(Debug, Clone)]
pub struct ClaimDefinitionCreate {
    pub claim_type: String,
    pub claim_value: String,
}

impl ClaimDefinitionCreate {
    pub fn new(claim_type: impl Into<String>, claim_value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            claim_value: claim_value.into(),
        }
    }
}
