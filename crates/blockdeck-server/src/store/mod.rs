//! SQLite pool setup

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::core::error::Result;

pub const DB_FILE: &str = "blockdeck.db";

/// Open the shared connection pool, creating the database on first run.
/// WAL plus a busy timeout lets concurrent writers serialize in the
/// storage layer instead of failing.
pub async fn connect(data_dir: &Path) -> Result<SqlitePool> {
    let db_path = data_dir.join(DB_FILE);

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    info!("[Store] SQLite pool open at {:?}", db_path);
    Ok(pool)
}
