//! Bearer token minting for tests. The service itself never issues tokens.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

pub const TEST_ISSUER: &str = "https://issuer.claims-api.test";
pub const TEST_AUDIENCE: &str = "claims-api";
pub const TEST_SECRET: &[u8] = b"claims-api-test-secret-do-not-use-in-prod";

#[derive(Debug, Serialize)]
struct TestClaims {
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    iss: String,
    aud: String,
    exp: i64,
    iat: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    nbf: Option<i64>,
}

/// Builder for HS256 tokens; defaults are valid against the test security settings.
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    sub: Option<String>,
    issuer: String,
    audience: String,
    secret: Vec<u8>,
    ttl_secs: i64,
    not_before_in: Option<i64>,
}

impl Default for TokenBuilder {
    fn default() -> Self {
        Self {
            sub: Some("test-caller".to_string()),
            issuer: TEST_ISSUER.to_string(),
            audience: TEST_AUDIENCE.to_string(),
            secret: TEST_SECRET.to_vec(),
            ttl_secs: 15 * 60,
            not_before_in: None,
        }
    }
}

impl TokenBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `nbf` this many seconds from now.
    pub fn not_before_in(mut self, secs: i64) -> Self {
        self.not_before_in = Some(secs);
        self
    }

    pub fn without_subject(mut self) -> Self {
        self.sub = None;
        self
    }

    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn secret(mut self, secret: &[u8]) -> Self {
        self.secret = secret.to_vec();
        self
    }

    /// Negative values produce a token that is already expired.
    pub fn ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    pub fn mint(self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_secs() as i64;

        let claims = TestClaims {
            sub: self.sub,
            iss: self.issuer,
            aud: self.audience,
            exp: now + self.ttl_secs,
            iat: now,
            nbf: self.not_before_in.map(|secs| now + secs),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .expect("failed to encode test token")
    }
}

/// A valid token for the test issuer/audience/secret.
pub fn valid_token() -> String {
    TokenBuilder::new().mint()
}

/// Expired well past the default leeway.
pub fn expired_token() -> String {
    TokenBuilder::new().ttl_secs(-3600).mint()
}

/// `Authorization` header value for a token.
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
