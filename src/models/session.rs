// src/models/session.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quiz::{
    scoring::ReviewItem,
    session::{Session, SessionState},
};

/// DTO for entering the player's name.
/// The name is stored as typed (trimmed); escaping is the renderer's job.
#[derive(Debug, Deserialize)]
pub struct StartQuizRequest {
    pub name: String,
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize)]
pub struct SubmitAnswersRequest {
    /// User's answers map.
    /// Key: question index in the catalog
    /// Value: the selected option text
    #[serde(default)]
    pub answers: BTreeMap<usize, String>,
}

/// Score and review shown once the quiz is submitted.
#[derive(Debug, Serialize)]
pub struct ResultView {
    pub score: usize,
    pub total: usize,
    pub message: String,
    pub review: Vec<ReviewItem>,
}

/// Everything a client needs to draw the current screen.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    pub answers: BTreeMap<usize, String>,
    pub result_saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultView>,
}

impl SessionView {
    pub fn render(session_id: Uuid, session: &Session) -> Self {
        let greeting = match session {
            Session::InProgress { user_name } => Some(format!("Good luck, {}!", user_name)),
            _ => None,
        };

        let result = session.scorecard().map(|card| ResultView {
            score: card.score,
            total: card.total,
            message: card.summary(),
            review: card.review.clone(),
        });

        Self {
            session_id,
            state: session.state(),
            user_name: session.user_name().map(str::to_string),
            greeting,
            answers: session.answers(),
            result_saved: session.result_saved(),
            result,
        }
    }
}
