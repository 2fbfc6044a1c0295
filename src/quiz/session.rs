// src/quiz/session.rs

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    models::result::NewResult,
    quiz::{
        catalog::Catalog,
        error::QuizError,
        scoring::{self, Scorecard},
    },
    store::ResultStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    InProgress,
    Submitted,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionState::NotStarted => "not started",
            SessionState::InProgress => "in progress",
            SessionState::Submitted => "submitted",
        })
    }
}

/// One player's attempt at the quiz.
///
/// Transitions borrow the current value and return the next one, so a
/// failed transition leaves the caller's session untouched. The result row
/// is written on the `InProgress -> Submitted` edge and nowhere else, which
/// makes `Submitted` imply "saved exactly once".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    NotStarted,
    InProgress {
        user_name: String,
    },
    Submitted {
        user_name: String,
        answers: BTreeMap<usize, String>,
        scorecard: Scorecard,
        result_id: i64,
    },
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        match self {
            Session::NotStarted => SessionState::NotStarted,
            Session::InProgress { .. } => SessionState::InProgress,
            Session::Submitted { .. } => SessionState::Submitted,
        }
    }

    pub fn user_name(&self) -> Option<&str> {
        match self {
            Session::NotStarted => None,
            Session::InProgress { user_name } | Session::Submitted { user_name, .. } => {
                Some(user_name)
            }
        }
    }

    pub fn is_started(&self) -> bool {
        !matches!(self, Session::NotStarted)
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, Session::Submitted { .. })
    }

    pub fn result_saved(&self) -> bool {
        self.is_submitted()
    }

    /// The submitted answers; empty before submission.
    pub fn answers(&self) -> BTreeMap<usize, String> {
        match self {
            Session::Submitted { answers, .. } => answers.clone(),
            _ => BTreeMap::new(),
        }
    }

    pub fn scorecard(&self) -> Option<&Scorecard> {
        match self {
            Session::Submitted { scorecard, .. } => Some(scorecard),
            _ => None,
        }
    }

    /// Records the player's name and begins the quiz.
    pub fn start(&self, name: &str) -> Result<Session, QuizError> {
        if self.is_started() {
            return Err(QuizError::InvalidTransition {
                action: "start the quiz",
                state: self.state(),
            });
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(QuizError::EmptyName);
        }

        tracing::info!("Quiz started by '{}'", name);
        Ok(Session::InProgress {
            user_name: name.to_string(),
        })
    }

    /// Validates and grades `answers`, then appends the result to `store`.
    ///
    /// On any error, including a failed write, no state change happens and
    /// nothing has been persisted.
    pub async fn submit(
        &self,
        answers: BTreeMap<usize, String>,
        catalog: &Catalog,
        store: &dyn ResultStore,
    ) -> Result<Session, QuizError> {
        let Session::InProgress { user_name } = self else {
            return Err(QuizError::InvalidTransition {
                action: "submit answers",
                state: self.state(),
            });
        };

        validate_answers(catalog, &answers)?;
        let scorecard = scoring::grade(catalog, &answers);
        let score = u32::try_from(scorecard.score)
            .map_err(|_| QuizError::CountOutOfRange(scorecard.score))?;
        let total = u32::try_from(scorecard.total)
            .map_err(|_| QuizError::CountOutOfRange(scorecard.total))?;

        let row = store
            .append(NewResult::now(user_name.as_str(), score, total))
            .await?;

        tracing::info!(
            "'{}' submitted: {}/{} (result #{})",
            user_name,
            scorecard.score,
            scorecard.total,
            row.id
        );

        Ok(Session::Submitted {
            user_name: user_name.clone(),
            answers,
            scorecard,
            result_id: row.id,
        })
    }

    /// Discards everything and goes back to the name screen.
    pub fn restart(&self) -> Session {
        tracing::debug!("Session restarted from {}", self.state());
        Session::NotStarted
    }
}

/// Checks that `answers` holds one of the offered options for every
/// question in `catalog`, and nothing else.
pub fn validate_answers(
    catalog: &Catalog,
    answers: &BTreeMap<usize, String>,
) -> Result<(), QuizError> {
    if let Some(&index) = answers.keys().find(|&&i| i >= catalog.len()) {
        return Err(QuizError::UnknownQuestion(index));
    }

    let missing: Vec<usize> = (0..catalog.len())
        .filter(|i| answers.get(i).is_none_or(|a| a.is_empty()))
        .collect();
    if !missing.is_empty() {
        return Err(QuizError::IncompleteAnswers { missing });
    }

    for (&index, answer) in answers {
        let offered = catalog
            .get(index)
            .is_some_and(|question| question.has_option(answer));
        if !offered {
            return Err(QuizError::InvalidOption {
                index,
                answer: answer.clone(),
            });
        }
    }

    Ok(())
}
