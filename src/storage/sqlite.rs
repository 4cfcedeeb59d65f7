//! Durable record sink backed by a single SQLite file.

use crate::domain::{NewRecord, Record};
use crate::error::{PipelineError, Result};
use crate::storage::{validate_ident, RecordSink};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub const DEFAULT_TABLE: &str = "records";

/// A record sink over a SQLite connection pool.
///
/// The pool holds a single connection, so all writes go through one writer.
pub struct SqliteSink {
    pool: SqlitePool,
    table: String,
}

impl SqliteSink {
    /// Opens (creating if missing) the database at `database_url`,
    /// e.g. `sqlite://books.db` or `sqlite::memory:`.
    pub async fn connect(database_url: &str, table: &str) -> Result<Self> {
        if !validate_ident(table) {
            return Err(PipelineError::InvalidIdentifier(table.to_string()));
        }
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        tracing::debug!(database_url, table, "opened record store");
        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }

    /// A private in-memory database (for tests).
    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:", DEFAULT_TABLE).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

#[async_trait]
impl RecordSink for SqliteSink {
    async fn initialize(&self) -> Result<()> {
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                identifier INTEGER PRIMARY KEY AUTOINCREMENT,
                primary_text TEXT NOT NULL,
                secondary_text TEXT NOT NULL UNIQUE,
                numeric_attribute INTEGER
            )",
            self.table
        ))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query(&format!("DELETE FROM {}", self.table))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert(&self, record: NewRecord) -> Result<Record> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(&format!(
            "INSERT INTO {} (primary_text, secondary_text, numeric_attribute) VALUES (?, ?, ?)",
            self.table
        ))
        .bind(&record.primary_text)
        .bind(&record.secondary_text)
        .bind(record.numeric_attribute)
        .execute(&mut *tx)
        .await;

        let identifier = match inserted {
            Ok(result) => result.last_insert_rowid(),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                // Dropping the transaction rolls it back.
                return Err(PipelineError::DuplicateKey {
                    secondary_text: record.secondary_text,
                });
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await?;
        Ok(record.into_record(identifier))
    }

    async fn fetch_all(&self, limit: Option<u32>) -> Result<Vec<Record>> {
        let sql = format!(
            "SELECT identifier, primary_text, secondary_text, numeric_attribute FROM {} ORDER BY identifier ASC{}",
            self.table,
            if limit.is_some() { " LIMIT ?" } else { "" }
        );
        let mut query = sqlx::query_as::<_, Record>(&sql);
        if let Some(limit) = limit {
            query = query.bind(i64::from(limit));
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn fetch(&self, identifier: i64) -> Result<Option<Record>> {
        let record = sqlx::query_as::<_, Record>(&format!(
            "SELECT identifier, primary_text, secondary_text, numeric_attribute FROM {} WHERE identifier = ?",
            self.table
        ))
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn count(&self) -> Result<u64> {
        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", self.table))
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::debug!(table = %self.table, "closed record store");
    }
}
