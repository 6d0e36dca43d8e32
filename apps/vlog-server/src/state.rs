//! Application state - shared across all handlers.

use std::sync::Arc;

use actix_web::web;

use vlog_core::ports::{PasswordService, TokenService, UserRepository};
use vlog_core::{VlogConfig, VlogService};
use vlog_infra::Repositories;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub vlogs: Arc<VlogService>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    pub fn new(
        repos: &Repositories,
        config: VlogConfig,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        let vlogs = VlogService::new(repos.posts.clone(), repos.categories.clone(), config);

        Self {
            vlogs: Arc::new(vlogs),
            users: repos.users.clone(),
            tokens,
            passwords,
        }
    }

    /// Register the state and the auth services as app data.
    ///
    /// The identity extractor looks the token service up on its own.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.clone()))
            .app_data(web::Data::new(self.tokens.clone()))
            .app_data(web::Data::new(self.passwords.clone()));
    }
}

/// Pick the store: PostgreSQL when `DATABASE_URL` is set, memory otherwise.
#[cfg(feature = "postgres")]
pub async fn build_repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    use migration::{Migrator, MigratorTrait};

    let Some(db_config) = &config.database else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Ok(Repositories::in_memory());
    };

    let db = vlog_infra::connect(db_config).await?;
    if config.run_migrations {
        tracing::info!("Applying pending migrations");
        Migrator::up(&db, None).await?;
    }

    Ok(Repositories::postgres(db))
}

#[cfg(not(feature = "postgres"))]
pub async fn build_repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    if config.database.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
    }
    tracing::info!("Using in-memory store");
    Ok(Repositories::in_memory())
}
