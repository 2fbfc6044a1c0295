// src/quiz/mod.rs

pub mod catalog;
pub mod error;
pub mod scoring;
pub mod session;

pub use catalog::Catalog;
pub use error::QuizError;
pub use session::{Session, SessionState};
