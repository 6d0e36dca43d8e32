//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use vlog_core::VlogConfig;
use vlog_core::pagination::{DEFAULT_PAGE_SIZE, PaginationConfig};
use vlog_infra::database::DatabaseConfig;
use vlog_infra::{JwtConfig, auth::DEFAULT_ISSUER};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs on the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub run_migrations: bool,
    pub seed_sample_data: bool,
    pub vlog: VlogConfig,
    pub jwt: JwtConfig,
}

fn parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn flag(key: &str) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                url,
                max_connections: parsed("DB_MAX_CONNECTIONS", 100),
                min_connections: parsed("DB_MIN_CONNECTIONS", 10),
            });

        let defaults = VlogConfig::default();
        let vlog = VlogConfig {
            pagination: PaginationConfig::with_page_size(parsed("PAGE_SIZE", DEFAULT_PAGE_SIZE)),
            admin_pagination: PaginationConfig::with_page_size(parsed(
                "ADMIN_PAGE_SIZE",
                defaults.admin_pagination.page_size,
            )),
            related_limit: parsed("RELATED_LIMIT", defaults.related_limit),
            ..defaults
        };

        let jwt_defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: env::var("JWT_SECRET").unwrap_or(jwt_defaults.secret),
            expiration_hours: parsed("JWT_EXPIRATION_HOURS", jwt_defaults.expiration_hours),
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.to_string()),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT", 8080),
            database,
            run_migrations: flag("RUN_MIGRATIONS"),
            seed_sample_data: flag("SEED_SAMPLE_DATA"),
            vlog,
            jwt,
        }
    }
}
