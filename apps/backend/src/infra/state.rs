use std::sync::Arc;

use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::repos::claim_catalog::{ClaimCatalog, SeaClaimCatalog};
use crate::repos::user_directory::{SeaUserDirectory, UserDirectory};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_url: Option<String>,
    stores: Option<(Arc<dyn ClaimCatalog>, Arc<dyn UserDirectory>)>,
}

impl StateBuilder {
    pub fn new(security_config: SecurityConfig) -> Self {
        Self {
            security_config,
            db_url: None,
            stores: None,
        }
    }

    /// Back the stores with this database; it is migrated during `build`.
    pub fn with_db_url(mut self, url: impl Into<String>) -> Self {
        self.db_url = Some(url.into());
        self
    }

    /// Use explicit store implementations instead of deriving them from the database.
    /// Without a database url these are the only stores the state gets.
    pub fn with_stores(
        mut self,
        catalog: Arc<dyn ClaimCatalog>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        self.stores = Some((catalog, directory));
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let db = match &self.db_url {
            Some(url) => Some(bootstrap_db(url).await?),
            None => None,
        };

        let (catalog, directory) = match (self.stores, &db) {
            (Some(stores), _) => stores,
            (None, Some(conn)) => (
                Arc::new(SeaClaimCatalog::new(conn.clone())) as Arc<dyn ClaimCatalog>,
                Arc::new(SeaUserDirectory::new(conn.clone())) as Arc<dyn UserDirectory>,
            ),
            (None, None) => {
                return Err(AppError::config(
                    "state needs a database url or explicit stores",
                ))
            }
        };

        Ok(AppState::new(db, self.security_config, catalog, directory))
    }
}

pub fn build_state(security_config: SecurityConfig) -> StateBuilder {
    StateBuilder::new(security_config)
}
