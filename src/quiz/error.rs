// src/quiz/error.rs

use thiserror::Error;

use crate::{quiz::session::SessionState, store::StoreError};

/// Errors raised by the quiz core.
///
/// Everything except `Storage` is a validation failure: it is reported to
/// the player, the session does not advance and nothing is written.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Please enter your name to start the quiz.")]
    EmptyName,

    #[error("Please answer all questions before submitting (missing: {missing:?}).")]
    IncompleteAnswers { missing: Vec<usize> },

    #[error("Question {0} does not exist.")]
    UnknownQuestion(usize),

    #[error("'{answer}' is not an option for question {index}.")]
    InvalidOption { index: usize, answer: String },

    #[error("Cannot {action} while the quiz is {state}.")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    #[error("invalid question: {0}")]
    InvalidQuestion(String),

    #[error("{0} does not fit in a result row")]
    CountOutOfRange(usize),

    #[error("the catalog has no questions")]
    EmptyCatalog,

    #[error(transparent)]
    Storage(#[from] StoreError),
}
