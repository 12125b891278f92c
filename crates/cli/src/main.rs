//! Drizzl CLI - Database migrations, catalog seeding and margin reports.
//!
//! # Usage
//!
//! ```bash
//! # Run admin database migrations
//! drizzl-cli migrate
//!
//! # Seed the demo catalog with fresh product IDs and synthesized cost records
//! drizzl-cli seed demo --with-costs
//!
//! # Seed products from a YAML file
//! drizzl-cli seed file catalog.yaml
//!
//! # Log the margin table and portfolio suggestions
//! drizzl-cli report --active-only
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Insert catalog products (demo set or YAML file)
//! - `report` - Margin report over the configured catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "drizzl-cli")]
#[command(author, version, about = "Drizzl CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run admin database migrations
    Migrate,
    /// Seed the product catalog
    Seed {
        #[command(subcommand)]
        source: SeedSource,
    },
    /// Log the margin table and portfolio suggestions
    Report {
        /// Only include active products
        #[arg(long)]
        active_only: bool,
    },
}

#[derive(Subcommand)]
enum SeedSource {
    /// Insert the built-in demo products under fresh IDs
    Demo {
        /// Also write synthesized cost records
        #[arg(long)]
        with_costs: bool,
    },
    /// Insert products listed in a YAML file
    File {
        /// Path to the YAML catalog
        path: PathBuf,

        /// Also write synthesized cost records
        #[arg(long)]
        with_costs: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Defaults to info level if RUST_LOG is not set
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::admin().await?,
        Commands::Seed { source } => match source {
            SeedSource::Demo { with_costs } => commands::seed::demo(with_costs).await?,
            SeedSource::File { path, with_costs } => {
                commands::seed::file(&path, with_costs).await?;
            }
        },
        Commands::Report { active_only } => commands::report::margins(active_only).await?,
    }
    Ok(())
}
