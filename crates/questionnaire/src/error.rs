//! Error types for sessions and question flow.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuestionnaireError {
    /// Unknown or missing session id.
    #[error("Invalid session or user_id")]
    InvalidSession(String),

    /// The session has moved past the last question.
    #[error("No more questions available.")]
    NoMoreQuestions,
}

pub type Result<T> = std::result::Result<T, QuestionnaireError>;
