// src/models/question.rs

use serde::{Deserialize, Serialize};

use crate::quiz::error::QuizError;

/// A multiple-choice question with exactly one correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The text shown to the player.
    pub text: String,

    /// Ordered list of options, at least two.
    pub options: Vec<String>,

    /// The correct option. Always equal to one of `options`.
    pub answer: String,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        answer: impl Into<String>,
    ) -> Result<Self, QuizError> {
        let question = Self {
            text: text.into(),
            options: options.into_iter().map(Into::into).collect(),
            answer: answer.into(),
        };
        question.check()?;
        Ok(question)
    }

    pub(crate) fn check(&self) -> Result<(), QuizError> {
        if self.text.trim().is_empty() {
            return Err(QuizError::InvalidQuestion(
                "question text cannot be empty".to_string(),
            ));
        }
        if self.options.len() < 2 {
            return Err(QuizError::InvalidQuestion(format!(
                "'{}' needs at least 2 options, got {}",
                self.text,
                self.options.len()
            )));
        }
        if !self.has_option(&self.answer) {
            return Err(QuizError::InvalidQuestion(format!(
                "answer '{}' of '{}' is not one of its options",
                self.answer, self.text
            )));
        }
        Ok(())
    }

    pub fn has_option(&self, candidate: &str) -> bool {
        self.options.iter().any(|o| o == candidate)
    }
}

/// DTO for sending a question to the client (excludes the answer).
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub index: usize,
    pub text: String,
    pub options: Vec<String>,
}

impl PublicQuestion {
    pub fn from_question(index: usize, question: &Question) -> Self {
        Self {
            index,
            text: question.text.clone(),
            options: question.options.clone(),
        }
    }
}
