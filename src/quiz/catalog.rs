// src/quiz/catalog.rs

use crate::{
    models::question::{PublicQuestion, Question},
    quiz::error::QuizError,
};

/// The fixed, ordered list of quiz questions.
///
/// Built once at startup and shared read-only afterwards; there is no
/// mutation API.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Builds a catalog, validating every question.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyCatalog);
        }
        for question in &questions {
            question.check()?;
        }
        Ok(Self { questions })
    }

    /// The general-knowledge quiz served by default.
    pub fn builtin() -> Self {
        let q = |text: &str, options: [&str; 4], answer: &str| Question {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
        };

        Self {
            questions: vec![
                q(
                    "What is the capital of France?",
                    ["Berlin", "Madrid", "Paris", "Rome"],
                    "Paris",
                ),
                q(
                    "Which planet is known as the Red Planet?",
                    ["Earth", "Mars", "Jupiter", "Venus"],
                    "Mars",
                ),
                q(
                    "What is the largest mammal in the world?",
                    ["Elephant", "Blue Whale", "Giraffe", "Great White Shark"],
                    "Blue Whale",
                ),
                q(
                    "Who wrote 'Romeo and Juliet'?",
                    [
                        "Charles Dickens",
                        "William Shakespeare",
                        "Mark Twain",
                        "Jane Austen",
                    ],
                    "William Shakespeare",
                ),
                q(
                    "What is the value of pi (π) to two decimal places?",
                    ["3.12", "3.14", "3.16", "3.18"],
                    "3.14",
                ),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Questions with their answers stripped, for rendering.
    pub fn public_questions(&self) -> Vec<PublicQuestion> {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, q)| PublicQuestion::from_question(i, q))
            .collect()
    }
}
