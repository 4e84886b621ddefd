use jsonwebtoken::Algorithm;

/// Clock skew tolerated on `exp`/`nbf` unless configured otherwise.
pub const DEFAULT_LEEWAY_SECS: u64 = 60;

/// Settings used to validate incoming bearer tokens.
#[derive(Clone)]
pub struct SecurityConfig {
    /// Expected `iss` claim
    pub issuer: String,
    /// Expected `aud` claim
    pub audience: String,
    /// Symmetric signing key
    pub jwt_secret: Vec<u8>,
    /// Signature algorithm (HS256)
    pub algorithm: Algorithm,
    pub leeway_secs: u64,
}

impl SecurityConfig {
    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        jwt_secret: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            leeway_secs: DEFAULT_LEEWAY_SECS,
        }
    }

    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}
