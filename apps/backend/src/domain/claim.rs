//! The `(type, value)` pair at the centre of the service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "type")]
    pub claim_type: String,
    #[serde(rename = "value")]
    pub claim_value: String,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, claim_value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            claim_value: claim_value.into(),
        }
    }

    /// Exact, case-sensitive match on both halves.
    pub fn matches(&self, claim_type: &str, claim_value: &str) -> bool {
        self.claim_type == claim_type && self.claim_value == claim_value
    }
}
