//! Page Store
//!
//! Pages are append-only: every save inserts a new row with a fresh
//! monotonic id. There is no update, delete, or versioning.

pub mod handlers;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::info;

use crate::core::blocks::{self, Block};
use crate::core::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub name: String,
    pub content: Vec<Block>,
    pub created_at: DateTime<Utc>,
}

/// Listing entry; content stays in the row until the page is fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSummary {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

pub struct PageStore {
    pool: SqlitePool,
}

impl PageStore {
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS pages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Newest first. Ids are monotonic, so descending id is creation order.
    pub async fn list(&self) -> Result<Vec<PageSummary>> {
        let rows: Vec<(i64, String, String)> =
            sqlx::query_as("SELECT id, name, created_at FROM pages ORDER BY id DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, created_at)| PageSummary {
                id,
                name,
                created_at: parse_timestamp(&created_at),
            })
            .collect())
    }

    /// Validate and persist a new page, returning its assigned id.
    ///
    /// Every call inserts a fresh row; the id is assigned by the single
    /// insert statement, so concurrent saves never collide. Retrying a
    /// save after an ambiguous response creates a duplicate page.
    pub async fn save(&self, name: &str, raw_content: &Value) -> Result<i64> {
        let content = blocks::validate(raw_content)?;
        let serialized = blocks::serialize(&content)?;

        let result =
            sqlx::query("INSERT INTO pages (name, content, created_at) VALUES (?, ?, ?)")
                .bind(name)
                .bind(&serialized)
                .bind(Utc::now().to_rfc3339())
                .execute(&self.pool)
                .await?;

        let id = result.last_insert_rowid();
        info!("[Pages] Saved '{name}' as id {id} ({} blocks)", content.len());
        Ok(id)
    }

    pub async fn get(&self, id: i64) -> Result<Page> {
        let row: Option<(i64, String, String, String)> =
            sqlx::query_as("SELECT id, name, content, created_at FROM pages WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let (id, name, content, created_at) = row.ok_or(Error::NotFound { id })?;

        Ok(Page {
            id,
            name,
            content: blocks::deserialize(&content)?,
            created_at: parse_timestamp(&created_at),
        })
    }
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap_or_else(|_| Utc::now())
}
