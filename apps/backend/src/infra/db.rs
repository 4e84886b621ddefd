use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 500;

/// Strip credentials from a connection string before logging it.
pub fn redact_db_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}

fn is_sqlite_memory(url: &str) -> bool {
    url.starts_with("sqlite") && url.contains(":memory:")
}

/// Retry a connection attempt with fixed interval delays.
/// Returns the result of the last attempt after all retries are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, "db.connect_retry_succeeded");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "db.connect_retry");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

/// Open a connection pool. Does NOT run migrations.
///
/// In-memory SQLite is pinned to one connection so every query sees the same database.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let memory = is_sqlite_memory(database_url);
    let attempts = if memory { 1 } else { CONNECT_ATTEMPTS };

    let conn = retry_connection(
        move || async move {
            let mut opt = ConnectOptions::new(database_url.to_string());
            opt.sqlx_logging(false);
            if memory {
                opt.max_connections(1).min_connections(1);
            }
            Database::connect(opt).await.map_err(AppError::from)
        },
        attempts,
        CONNECT_RETRY_INTERVAL_MS,
    )
    .await?;

    info!(url = %redact_db_url(database_url), "db.connected");
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(database_url).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_credentials() {
        assert_eq!(
            redact_db_url("postgresql://app:pw@db:5432/claims"),
            "postgresql://***@db:5432/claims"
        );
        assert_eq!(redact_db_url("sqlite::memory:"), "sqlite::memory:");
    }

    #[test]
    fn detects_in_memory_sqlite() {
        assert!(is_sqlite_memory("sqlite::memory:"));
        assert!(!is_sqlite_memory("sqlite://claims.db?mode=rwc"));
        assert!(!is_sqlite_memory("postgresql://localhost/claims"));
    }

    #[tokio::test]
    async fn bootstrap_migrates_in_memory_database() {
        let conn = bootstrap_db("sqlite::memory:").await.unwrap();
        assert_eq!(migration::count_applied_migrations(&conn).await.unwrap(), 1);
    }
}
