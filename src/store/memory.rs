// src/store/memory.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{ResultStore, StoreError};
use crate::models::result::{NewResult, QuizResult};

/// `ResultStore` that keeps rows in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResultStore {
    rows: Arc<Mutex<Vec<QuizResult>>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<E>(_: E) -> StoreError {
    StoreError::Unavailable("result store lock poisoned".to_string())
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn append(&self, result: NewResult) -> Result<QuizResult, StoreError> {
        let mut rows = self.rows.lock().map_err(poisoned)?;
        let row = QuizResult {
            id: rows.len() as i64 + 1,
            name: result.name,
            score: result.score,
            total_questions: result.total_questions,
            timestamp: result.timestamp,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<QuizResult>, StoreError> {
        let mut rows = self.rows.lock().map_err(poisoned)?.clone();
        rows.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.timestamp.cmp(&a.timestamp))
                .then(b.id.cmp(&a.id))
        });
        Ok(rows)
    }
}
