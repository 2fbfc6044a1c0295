// src/store/sqlite.rs

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};

use super::{ResultStore, StoreError};
use crate::models::result::{NewResult, QuizResult};

/// `ResultStore` backed by a SQLite database through an sqlx pool.
///
/// SQLite allows one writer at a time; the busy timeout makes concurrent
/// appends wait for the lock instead of failing.
#[derive(Debug, Clone)]
pub struct SqliteResultStore {
    pool: SqlitePool,
}

impl SqliteResultStore {
    /// Opens (creating if missing) the database at `database_url`.
    ///
    /// In-memory URLs get a single connection that is never recycled: every
    /// connection to `sqlite::memory:` sees its own empty database.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        let mut options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(3));
        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl ResultStore for SqliteResultStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                score INTEGER NOT NULL,
                total_questions INTEGER NOT NULL,
                timestamp DATETIME NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create results table: {:?}", e);
            StoreError::from(e)
        })?;

        Ok(())
    }

    async fn append(&self, result: NewResult) -> Result<QuizResult, StoreError> {
        let row = sqlx::query_as::<_, QuizResult>(
            r#"
            INSERT INTO results (name, score, total_questions, timestamp)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, score, total_questions, timestamp
            "#,
        )
        .bind(&result.name)
        .bind(result.score)
        .bind(result.total_questions)
        .bind(result.timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert result for '{}': {:?}", result.name, e);
            StoreError::from(e)
        })?;

        tracing::debug!(id = row.id, name = %row.name, score = row.score, "Result stored");
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<QuizResult>, StoreError> {
        let rows = sqlx::query_as::<_, QuizResult>(
            r#"
            SELECT id, name, score, total_questions, timestamp
            FROM results
            ORDER BY score DESC, timestamp DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch results: {:?}", e);
            StoreError::from(e)
        })?;

        Ok(rows)
    }
}
