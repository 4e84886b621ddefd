//! DTOs for users_sea adapter.

/// DTO for provisioning a directory user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub id: String,
    pub user_name: Option<String>,
    pub email: Option<String>,
}

impl UserCreate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_name: None,
            email: None,
        }
    }

    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// DTO for attaching a claim row to a user.
#[derive(Debug, Clone)]
pub struct UserClaimCreate {
    pub user_id: String,
    pub claim_type: String,
    pub claim_value: String,
}

impl UserClaimCreate {
    pub fn new(
        user_id: impl Into<String>,
        claim_type: impl Into<String>,
        claim_value: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            claim_type: claim_type.into(),
            claim_value: claim_value.into(),
        }
    }
}
