//! CLI subcommands.

pub mod migrate;
pub mod report;
pub mod seed;

use drizzl_admin::config::{AdminConfig, ConfigError};
use drizzl_admin::db::{self, PgCatalogStore, RepositoryError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Catalog write failed.
    #[error("Catalog error: {0}")]
    Repository(#[from] RepositoryError),

    /// Seed file could not be read.
    #[error("Could not read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file is not valid YAML for a product list.
    #[error("Invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Seed file parsed but a product is unusable.
    #[error("Invalid product in seed file: {0}")]
    InvalidProduct(String),
}

/// Connect to the admin database named by `ADMIN_DATABASE_URL` (or `DATABASE_URL`).
async fn connect(config: &AdminConfig) -> Result<PgCatalogStore, CliError> {
    let database_url = config
        .database_url
        .as_ref()
        .ok_or(CliError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    tracing::info!("Connecting to admin database...");
    let pool = db::create_pool(database_url).await?;
    Ok(PgCatalogStore::new(pool))
}
