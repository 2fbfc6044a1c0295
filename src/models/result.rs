// src/models/result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'results' table in the database.
/// One row per completed quiz session. Rows are never updated or deleted.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: i64,
    pub name: String,
    pub score: i64,
    pub total_questions: i64,
    pub timestamp: DateTime<Utc>,
}

/// A result that has not been written yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResult {
    pub name: String,
    pub score: i64,
    pub total_questions: i64,
    pub timestamp: DateTime<Utc>,
}

impl NewResult {
    /// Stamps the result with the current instant.
    pub fn now(name: impl Into<String>, score: u32, total_questions: u32) -> Self {
        Self::at(name, score, total_questions, Utc::now())
    }

    pub fn at(
        name: impl Into<String>,
        score: u32,
        total_questions: u32,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            score: i64::from(score),
            total_questions: i64::from(total_questions),
            timestamp,
        }
    }
}

/// A leaderboard row as shown to players.
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: i64,
    pub total_questions: i64,
    pub timestamp: DateTime<Utc>,
    /// `timestamp` rendered as `YYYY-MM-DD HH:MM`.
    pub played_at: String,
}

impl From<QuizResult> for LeaderboardEntry {
    fn from(result: QuizResult) -> Self {
        Self {
            played_at: result.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            name: result.name,
            score: result.score,
            total_questions: result.total_questions,
            timestamp: result.timestamp,
        }
    }
}

/// Response body for the leaderboard endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LeaderboardResponse {
    pub fn from_results(results: Vec<QuizResult>) -> Self {
        let message = results
            .is_empty()
            .then(|| "No results yet. Be the first!".to_string());
        Self {
            entries: results.into_iter().map(LeaderboardEntry::from).collect(),
            message,
        }
    }
}
