#![allow(clippy::print_stdout, reason = "CLI prints results to stdout")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod commands;

use anyhow::{Context, Result};
use cardbox_core::{CategoryId, DEFAULT_HTTP_PORT};
use cardbox_storage::StorageBackend;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cardbox")]
#[command(about = "Cards filed under categories, served over HTTP", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_HTTP_PORT)]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Print cards as JSON
    Cards {
        /// Only cards filed under this category id
        #[arg(short, long)]
        category: Option<CategoryId>,
    },
    /// Print every category name
    Categories,
    /// Print category names containing QUERY (case-insensitive)
    Suggest { query: String },
}

/// SQLite database location: `CARDBOX_DB_PATH`, else the platform data dir.
pub(crate) fn get_db_path() -> PathBuf {
    if let Ok(path) = std::env::var("CARDBOX_DB_PATH") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("cardbox").join("cardbox.db")
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating database directory {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(feature = "postgres")]
async fn open_postgres() -> Result<Option<StorageBackend>> {
    match std::env::var("CARDBOX_DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => Ok(Some(StorageBackend::new_postgres(&url).await?)),
        _ => Ok(None),
    }
}

#[cfg(not(feature = "postgres"))]
#[allow(clippy::unused_async, reason = "mirrors the postgres signature")]
async fn open_postgres() -> Result<Option<StorageBackend>> {
    Ok(None)
}

/// Opens PostgreSQL when built with `postgres` and `CARDBOX_DATABASE_URL` is
/// set, SQLite otherwise.
pub(crate) async fn open_storage() -> Result<StorageBackend> {
    if let Some(backend) = open_postgres().await? {
        tracing::info!(backend = backend.kind(), "storage ready");
        return Ok(backend);
    }

    let db_path = get_db_path();
    ensure_db_dir(&db_path)?;
    let backend = StorageBackend::new_sqlite(&db_path)
        .with_context(|| format!("opening {}", db_path.display()))?;
    tracing::info!(backend = backend.kind(), path = %db_path.display(), "storage ready");
    Ok(backend)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await?,
        Commands::Cards { category } => commands::inspect::run_cards(category).await?,
        Commands::Categories => commands::inspect::run_categories().await?,
        Commands::Suggest { query } => commands::inspect::run_suggest(&query).await?,
    }

    Ok(())
}
