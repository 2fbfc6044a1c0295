// src/store/mod.rs

use async_trait::async_trait;
use thiserror::Error;

use crate::models::result::{NewResult, QuizResult};

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryResultStore;
pub use sqlite::SqliteResultStore;

/// Errors surfaced by result stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistent log of completed quiz results.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Ensures the schema exists. Safe to call on every start.
    async fn initialize(&self) -> Result<(), StoreError>;

    /// Inserts one row and returns it with its assigned id.
    async fn append(&self, result: NewResult) -> Result<QuizResult, StoreError>;

    /// All rows, best score first; ties go to the most recent.
    async fn list_all(&self) -> Result<Vec<QuizResult>, StoreError>;
}
