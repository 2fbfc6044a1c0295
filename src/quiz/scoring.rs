// src/quiz/scoring.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::quiz::catalog::Catalog;

/// Per-question outcome, for the review screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub question: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Result of grading one answer set against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub score: usize,
    pub total: usize,
    pub review: Vec<ReviewItem>,
}

impl Scorecard {
    pub fn summary(&self) -> String {
        format!(
            "Quiz Submitted! Your final score is: {}/{}",
            self.score, self.total
        )
    }
}

/// Grades `answers` against `catalog`.
///
/// Comparison is exact string equality: case-sensitive, no trimming.
/// Indices missing from `answers` count as wrong.
pub fn grade(catalog: &Catalog, answers: &BTreeMap<usize, String>) -> Scorecard {
    let review: Vec<ReviewItem> = catalog
        .questions()
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let user_answer = answers.get(&i).cloned();
            let is_correct = user_answer.as_deref() == Some(q.answer.as_str());
            ReviewItem {
                question: q.text.clone(),
                user_answer,
                correct_answer: q.answer.clone(),
                is_correct,
            }
        })
        .collect();

    Scorecard {
        score: review.iter().filter(|r| r.is_correct).count(),
        total: review.len(),
        review,
    }
}
