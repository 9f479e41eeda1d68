//! CLI administration tool for linkshort.
//!
//! Provides commands for inspecting and maintaining the link database
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Access analytics for one short code
//! cargo run --bin admin -- analytics a1b2c3d4
//!
//! # Shorten a URL directly
//! cargo run --bin admin -- shorten https://example.com --ttl-hours 48
//!
//! # Delete expired mappings (access logs are kept)
//! cargo run --bin admin -- prune-expired
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server; see [`linkshort::config`].

use linkshort::AppError;
use linkshort::application::services::{AnalyticsService, LinkService};
use linkshort::config::{self, Config};
use linkshort::infrastructure::persistence::{
    SqliteAccessLogRepository, SqliteMappingRepository, pool,
};
use linkshort::utils::{timestamp, ttl};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing linkshort.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Show mapping and access counts
    Stats,

    /// Show the access log of a short code
    Analytics {
        /// Short code to inspect
        code: String,
    },

    /// Shorten a URL
    Shorten {
        /// URL to shorten (http:// or https://)
        url: String,

        /// Lifetime in hours (default from DEFAULT_TTL_HOURS)
        #[arg(long)]
        ttl_hours: Option<f64>,
    },

    /// Delete mappings whose expiry has passed
    PruneExpired {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;

    let pool = pool::connect(&config.database_url, &config.pool_settings())
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Analytics { code } => handle_analytics(&pool, &config, &code).await?,
        Commands::Shorten { url, ttl_hours } => {
            handle_shorten(&pool, &config, &url, ttl_hours).await?
        }
        Commands::PruneExpired { yes } => handle_prune_expired(&pool, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;

    Ok(())
}

/// Displays totals for mappings, expired mappings and logged accesses.
async fn handle_stats(pool: &SqlitePool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let now = timestamp::to_nanos(Utc::now()).context("System clock out of range")?;

    let mappings_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
        .fetch_one(pool)
        .await?;

    let expired_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings WHERE expires_at < ?")
            .bind(now)
            .fetch_one(pool)
            .await?;

    let accesses_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM access_logs")
        .fetch_one(pool)
        .await?;

    println!(
        "  Mappings:  {}",
        mappings_count.to_string().bright_green().bold()
    );
    println!(
        "  Expired:   {}",
        expired_count.to_string().bright_yellow().bold()
    );
    println!(
        "  Accesses:  {}",
        accesses_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Prints the access log of one code in log order.
async fn handle_analytics(pool: &SqlitePool, config: &Config, code: &str) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let service = AnalyticsService::new(Arc::new(SqliteAccessLogRepository::new(pool.clone())));
    let links = LinkService::new(Arc::new(SqliteMappingRepository::new(pool)))
        .with_base_url(config.base_url.clone());

    let analytics = service
        .get_analytics(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load analytics: {}", e))?;

    println!("{}", "📈 Analytics".bright_blue().bold());
    println!();
    println!("  Short URL: {}", links.short_url(code).cyan());

    match links.get_mapping(code).await {
        Ok(mapping) => {
            let expiry = mapping.expires_at.to_rfc3339();
            let expiry = if mapping.expires_at < Utc::now() {
                format!("{} (expired)", expiry).red()
            } else {
                expiry.bright_black()
            };
            println!("  Target:    {}", mapping.original_url);
            println!("  Expires:   {}", expiry);
        }
        Err(AppError::NotFound { .. }) => {
            println!("  Target:    {}", "no mapping (pruned or never created)".yellow());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to load mapping: {}", e)),
    }

    println!(
        "  Accesses:  {}",
        analytics.access_count.to_string().bright_green().bold()
    );
    println!();

    if analytics.entries.is_empty() {
        println!("{}", "  No accesses recorded".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<32} {}",
        "Timestamp".bright_white().bold(),
        "Client".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for entry in &analytics.entries {
        println!(
            "  {:<32} {}",
            entry.accessed_at.to_rfc3339().bright_black(),
            entry.client_address
        );
    }
    println!();

    Ok(())
}

/// Shortens a URL through the same service the HTTP API uses.
async fn handle_shorten(
    pool: &SqlitePool,
    config: &Config,
    url: &str,
    ttl_hours: Option<f64>,
) -> Result<()> {
    let service = LinkService::new(Arc::new(SqliteMappingRepository::new(Arc::new(
        pool.clone(),
    ))))
    .with_default_ttl(config.default_ttl())
    .with_base_url(config.base_url.clone());

    let ttl = ttl_hours
        .map(ttl::ttl_from_hours)
        .transpose()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let mapping = service
        .shorten(Some(url), ttl, Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("{}", "✅ Short link ready".green().bold());
    println!();
    println!(
        "  Short URL:  {}",
        service.short_url(&mapping.short_code).bright_yellow().bold()
    );
    println!("  Original:   {}", mapping.original_url.cyan());
    println!(
        "  Expires at: {}",
        mapping.expires_at.to_rfc3339().bright_black()
    );
    println!();

    Ok(())
}

/// Deletes expired mappings after confirmation.
///
/// Access log entries are not touched, so analytics for pruned codes stay
/// available.
async fn handle_prune_expired(pool: &SqlitePool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Prune Expired Links".bright_blue().bold());
    println!();

    let now = timestamp::to_nanos(Utc::now()).context("System clock out of range")?;

    let expired_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings WHERE expires_at < ?")
            .bind(now)
            .fetch_one(pool)
            .await?;

    if expired_count == 0 {
        println!("{}", "  Nothing to prune".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  Expired mappings: {}",
        expired_count.to_string().bright_yellow().bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete these mappings?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = sqlx::query("DELETE FROM url_mappings WHERE expires_at < ?")
        .bind(now)
        .execute(pool)
        .await?
        .rows_affected();

    println!();
    println!(
        "{} {}",
        "✅ Deleted mappings:".green().bold(),
        deleted.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Handles database maintenance commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  SQLite: {}", version.bright_white());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            pool::migrate(pool)
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
