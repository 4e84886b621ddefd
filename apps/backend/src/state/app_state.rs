use std::sync::Arc;

use actix_web::web;
use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::repos::claim_catalog::ClaimCatalog;
use crate::repos::user_directory::UserDirectory;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent when running on in-memory stores)
    pub db: Option<DatabaseConnection>,
    /// Bearer token validation settings
    pub security: SecurityConfig,
    pub catalog: Arc<dyn ClaimCatalog>,
    pub directory: Arc<dyn UserDirectory>,
}

impl AppState {
    pub fn new(
        db: Option<DatabaseConnection>,
        security: SecurityConfig,
        catalog: Arc<dyn ClaimCatalog>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            db,
            security,
            catalog,
            directory,
        }
    }

    /// Register the state and each store capability as app data.
    ///
    /// Handlers extract `web::Data<dyn ClaimCatalog>` / `web::Data<dyn UserDirectory>`
    /// rather than the whole state.
    pub fn configure_data(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.clone()))
            .app_data(web::Data::from(self.catalog.clone()))
            .app_data(web::Data::from(self.directory.clone()));
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("security", &self.security)
            .finish_non_exhaustive()
    }
}
