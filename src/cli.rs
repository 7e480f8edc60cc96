use clap::{Parser, Subcommand};

use crate::config::{mask_password, Config};
use crate::services::StatisticsService;

#[derive(Parser)]
#[command(name = "ledger-core")]
#[command(about = "Ledger Core - transaction ledger with rolling one-minute statistics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Database management commands
    #[command(subcommand)]
    Db(DbCommands),

    /// Print the effective configuration
    Config,

    /// Print statistics for transactions of the last 60 seconds
    Stats,
}

#[derive(Subcommand)]
pub enum DbCommands {
    /// Run database migrations
    Migrate,
}

pub async fn handle_db_migrate(config: &Config) -> anyhow::Result<()> {
    let Some(url) = &config.database_url else {
        anyhow::bail!("DATABASE_URL must be set to run migrations");
    };

    let pool = crate::db::create_pool(url, config.database_max_connections).await?;
    tracing::info!("Running database migrations...");
    crate::db::run_migrations(&pool, crate::db::MIGRATIONS_DIR).await?;

    println!("✓ Database migrations completed");
    Ok(())
}

pub fn handle_config_validate(config: &Config) -> anyhow::Result<()> {
    println!("Configuration:");
    println!("  Server Port: {}", config.server_port);
    match &config.database_url {
        Some(url) => println!("  Database URL: {}", mask_password(url)),
        None => println!("  Database URL: <unset, in-memory store>"),
    }
    println!("  Max DB Connections: {}", config.database_max_connections);
    match &config.cors_allowed_origins {
        Some(origins) => println!("  CORS Origins: {}", origins.join(", ")),
        None => println!("  CORS Origins: *"),
    }
    println!("  Log Format: {:?}", config.log_format);

    println!("✓ Configuration is valid");
    Ok(())
}

pub async fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let repository = crate::build_repository(config).await?;
    let stats = StatisticsService::new(repository)
        .recent_statistics()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to compute statistics: {}", e))?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
