use std::env;

use crate::error::AppError;

/// Resolve the database URL.
///
/// `DATABASE_URL` wins when set. Otherwise a Postgres URL is assembled from
/// `POSTGRES_HOST`/`POSTGRES_PORT` (defaulted) and `POSTGRES_DB`/`POSTGRES_USER`/`POSTGRES_PASSWORD` (required).
pub fn db_url() -> Result<String, AppError> {
    if let Ok(url) = env::var("DATABASE_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }

    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = must_var("POSTGRES_DB")?;
    let username = must_var("POSTGRES_USER")?;
    let password = must_var("POSTGRES_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

/// Get required environment variable or return error
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::db_url;
    use crate::AppError;

    const VARS: &[&str] = &[
        "DATABASE_URL",
        "POSTGRES_HOST",
        "POSTGRES_PORT",
        "POSTGRES_DB",
        "POSTGRES_USER",
        "POSTGRES_PASSWORD",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn database_url_takes_precedence() {
        clear_env();
        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::set_var("POSTGRES_DB", "ignored");
        assert_eq!(db_url().unwrap(), "sqlite::memory:");
        clear_env();
    }

    #[test]
    #[serial]
    fn builds_postgres_url_from_parts() {
        clear_env();
        env::set_var("POSTGRES_DB", "claims");
        env::set_var("POSTGRES_USER", "claims_app");
        env::set_var("POSTGRES_PASSWORD", "pw");
        assert_eq!(
            db_url().unwrap(),
            "postgresql://claims_app:pw@localhost:5432/claims"
        );

        env::set_var("POSTGRES_HOST", "db");
        env::set_var("POSTGRES_PORT", "6543");
        assert_eq!(db_url().unwrap(), "postgresql://claims_app:pw@db:6543/claims");
        clear_env();
    }

    #[test]
    #[serial]
    fn missing_parts_is_config_error() {
        clear_env();
        env::set_var("POSTGRES_DB", "claims");
        match db_url() {
            Err(AppError::Config { detail }) => assert!(detail.contains("POSTGRES_USER")),
            other => panic!("expected config error, got {other:?}"),
        }
        clear_env();
    }
}
