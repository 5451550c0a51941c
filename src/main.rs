use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sb_importer::config::Config;
use sb_importer::db::Database;
use sb_importer::import;
use sb_importer::store::PgImportStore;

/// Main entry point for the SB account import.
///
/// Initializes tracing and configuration, connects to the database, runs the
/// reconciliation over the configured workbook sheet and prints the summary.
/// Row-level errors still exit 0; fatal errors propagate with a non-zero
/// status after the pool is released.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sb_importer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db = Database::new(&config.database_url).await?;
    tracing::info!("Database connection pool established");

    let store = PgImportStore::new(db.pool.clone());
    let result = import::run(
        &store,
        Path::new(&config.workbook_path),
        &config.sheet_name,
    )
    .await;

    // The pool is released on every exit path, including fatal errors.
    db.pool.close().await;

    let summary = result?;

    println!("\n=== Upload Summary ===");
    println!("✓ Accounts created: {}", summary.created);
    println!("~ Balances updated: {}", summary.updated);
    println!("= Unchanged: {}", summary.unchanged);
    println!("⚠ Rows skipped: {}", summary.skipped);
    println!("✗ Errors: {}", summary.errors.len());

    if !summary.errors.is_empty() {
        println!("\nError details:");
        for error in &summary.errors {
            println!(
                "  Row {}: {} ({} - {})",
                error.row, error.message, error.full_name, error.account_number
            );
        }
    }

    println!("\n=== Verification ===");
    println!("Total SB users in database: {}", summary.verified_users);
    println!("Total SB accounts in database: {}", summary.verified_accounts);

    Ok(())
}
