use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Claims we read from an incoming bearer token.
///
/// `aud` is validated by `jsonwebtoken` and not surfaced here.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// Caller identity; not used for authorization.
    #[serde(default)]
    pub sub: Option<String>,
    pub iss: String,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Issued-at (seconds since epoch)
    #[serde(default)]
    pub iat: Option<i64>,
}

fn validation(security: &SecurityConfig) -> Validation {
    let mut validation = Validation::new(security.algorithm);
    validation.set_issuer(&[security.issuer.as_str()]);
    validation.set_audience(&[security.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "iss", "aud"]);
    validation.validate_nbf = true;
    validation.leeway = security.leeway_secs;
    validation
}

/// Verify signature, issuer, audience, and lifetime (`exp`, `nbf`) of a bearer token.
///
/// Expired tokens map to `UnauthorizedExpiredJwt`; every other failure maps
/// to `UnauthorizedInvalidJwt`.
pub fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<AccessClaims, AppError> {
    decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation(security),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    use super::verify_access_token;
    use crate::state::security_config::SecurityConfig;
    use crate::AppError;

    const SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

    fn security() -> SecurityConfig {
        SecurityConfig::new("https://issuer.test", "claims-api", SECRET)
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
    }

    fn mint(claims: serde_json::Value, secret: &[u8]) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    #[test]
    fn accepts_valid_token() {
        let token = mint(
            json!({"sub": "svc-a", "iss": "https://issuer.test", "aud": "claims-api", "exp": now() + 600, "iat": now()}),
            SECRET,
        );
        let claims = verify_access_token(&token, &security()).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("svc-a"));
        assert_eq!(claims.iss, "https://issuer.test");
    }

    #[test]
    fn accepts_token_without_subject() {
        let token = mint(
            json!({"iss": "https://issuer.test", "aud": "claims-api", "exp": now() + 600}),
            SECRET,
        );
        let claims = verify_access_token(&token, &security()).unwrap();
        assert!(claims.sub.is_none());
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let token = mint(
            json!({"iss": "https://issuer.test", "aud": "claims-api", "exp": now() - 3600}),
            SECRET,
        );
        assert!(matches!(
            verify_access_token(&token, &security()),
            Err(AppError::UnauthorizedExpiredJwt)
        ));
    }

    #[test]
    fn expiry_within_leeway_is_accepted() {
        let token = mint(
            json!({"iss": "https://issuer.test", "aud": "claims-api", "exp": now() - 10}),
            SECRET,
        );
        assert!(verify_access_token(&token, &security()).is_ok());

        let strict = security().with_leeway(0);
        assert!(matches!(
            verify_access_token(&token, &strict),
            Err(AppError::UnauthorizedExpiredJwt)
        ));
    }

    #[test]
    fn not_yet_valid_token_is_invalid() {
        let token = mint(
            json!({"iss": "https://issuer.test", "aud": "claims-api", "exp": now() + 7200, "nbf": now() + 3600}),
            SECRET,
        );
        assert!(matches!(
            verify_access_token(&token, &security()),
            Err(AppError::UnauthorizedInvalidJwt)
        ));
    }

    #[test]
    fn not_before_within_leeway_is_accepted() {
        let token = mint(
            json!({"iss": "https://issuer.test", "aud": "claims-api", "exp": now() + 600, "nbf": now() + 10}),
            SECRET,
        );
        assert!(verify_access_token(&token, &security()).is_ok());

        let strict = security().with_leeway(0);
        assert!(matches!(
            verify_access_token(&token, &strict),
            Err(AppError::UnauthorizedInvalidJwt)
        ));
    }

    #[test]
    fn wrong_signature_issuer_or_audience_is_invalid() {
        let cases = [
            mint(
                json!({"iss": "https://issuer.test", "aud": "claims-api", "exp": now() + 600}),
                b"another-secret",
            ),
            mint(
                json!({"iss": "https://elsewhere.test", "aud": "claims-api", "exp": now() + 600}),
                SECRET,
            ),
            mint(
                json!({"iss": "https://issuer.test", "aud": "other-api", "exp": now() + 600}),
                SECRET,
            ),
            mint(json!({"iss": "https://issuer.test", "exp": now() + 600}), SECRET),
            "not-a-jwt".to_string(),
        ];

        for token in cases {
            assert!(
                matches!(
                    verify_access_token(&token, &security()),
                    Err(AppError::UnauthorizedInvalidJwt)
                ),
                "token should be rejected as invalid: {token}"
            );
        }
    }
}
