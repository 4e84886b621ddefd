use std::env;

use super::db::must_var;
use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, DEFAULT_LEEWAY_SECS};

/// Build the token validation settings from `JWT_ISSUER`, `JWT_AUDIENCE`,
/// `JWT_SECRET_KEY`, and the optional `JWT_LEEWAY_SECS`.
pub fn security_config_from_env() -> Result<SecurityConfig, AppError> {
    let issuer = must_var("JWT_ISSUER")?;
    let audience = must_var("JWT_AUDIENCE")?;
    let secret = must_var("JWT_SECRET_KEY")?;
    if secret.is_empty() {
        return Err(AppError::config("JWT_SECRET_KEY must not be empty"));
    }

    let leeway = match env::var("JWT_LEEWAY_SECS") {
        Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
            AppError::config(format!("JWT_LEEWAY_SECS must be a whole number, got '{raw}'"))
        })?,
        Err(_) => DEFAULT_LEEWAY_SECS,
    };

    Ok(SecurityConfig::new(issuer, audience, secret.into_bytes()).with_leeway(leeway))
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::security_config_from_env;
    use crate::AppError;

    fn clear_env() {
        for var in ["JWT_ISSUER", "JWT_AUDIENCE", "JWT_SECRET_KEY", "JWT_LEEWAY_SECS"] {
            env::remove_var(var);
        }
    }

    fn set_required() {
        env::set_var("JWT_ISSUER", "https://issuer.test");
        env::set_var("JWT_AUDIENCE", "claims-api");
        env::set_var("JWT_SECRET_KEY", "secret");
    }

    #[test]
    #[serial]
    fn reads_required_settings_with_default_leeway() {
        clear_env();
        set_required();
        let config = security_config_from_env().unwrap();
        assert_eq!(config.issuer, "https://issuer.test");
        assert_eq!(config.audience, "claims-api");
        assert_eq!(config.jwt_secret, b"secret".to_vec());
        assert_eq!(config.leeway_secs, 60);
        clear_env();
    }

    #[test]
    #[serial]
    fn leeway_override_is_parsed() {
        clear_env();
        set_required();
        env::set_var("JWT_LEEWAY_SECS", "5");
        assert_eq!(security_config_from_env().unwrap().leeway_secs, 5);

        env::set_var("JWT_LEEWAY_SECS", "soon");
        assert!(matches!(
            security_config_from_env(),
            Err(AppError::Config { .. })
        ));
        clear_env();
    }

    #[test]
    #[serial]
    fn missing_secret_is_config_error() {
        clear_env();
        env::set_var("JWT_ISSUER", "https://issuer.test");
        env::set_var("JWT_AUDIENCE", "claims-api");
        match security_config_from_env() {
            Err(AppError::Config { detail }) => assert!(detail.contains("JWT_SECRET_KEY")),
            other => panic!("expected config error, got {other:?}"),
        }
        clear_env();
    }
}
