//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! drizzl-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Admin migrations: `crates/admin/migrations/`

use drizzl_admin::config::AdminConfig;

use super::{CliError, connect};

/// Run admin database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn admin() -> Result<(), CliError> {
    let config = AdminConfig::from_env()?;
    let store = connect(&config).await?;

    tracing::info!("Running admin migrations...");
    sqlx::migrate!("../admin/migrations")
        .run(store.pool())
        .await?;

    tracing::info!("Admin migrations complete!");
    Ok(())
}
