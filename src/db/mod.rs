// Database module - provides data access layer

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

// Re-export models for convenience
pub mod models;
pub use models::*;

// Internal modules
mod answer;
mod catalog;
mod couple;
mod migrations;
mod partie;
mod stats;

// Main database handle
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Open (creating if missing) the database at `url` and apply pending
    /// migrations. `url` is a file path or a `sqlite:` URL.
    pub async fn new(url: &str) -> color_eyre::Result<Self> {
        let options = if url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(url)?
        } else {
            // Plain file path
            SqliteConnectOptions::new().filename(url)
        };

        let options = options
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        migrations::run(&pool).await?;

        Ok(Self { pool })
    }
}
