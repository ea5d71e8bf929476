//! Error types for question-bank loading and answer evaluation.

use thiserror::Error;

/// Result type for question-bank operations.
pub type Result<T> = std::result::Result<T, BankError>;

/// Errors raised while loading a question bank or evaluating selections against it.
///
/// The scorer itself never fails; these only surface at the loading seam.
#[derive(Debug, Error)]
pub enum BankError {
    /// Reading the bank from disk failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Two questions share the same id.
    #[error("duplicate question id: {0}")]
    DuplicateQuestion(String),

    /// An NSI error type was attached to a non-NSI question.
    #[error("question {0} carries an NSI error type but is not an NSI question")]
    MisplacedNsiErrorType(String),

    /// A selection references a question that is not in the bank.
    #[error("unknown question id: {0}")]
    UnknownQuestion(String),

    /// A selection references an option the question does not offer.
    #[error("unknown option {option} for question {question}")]
    UnknownOption { question: String, option: String },
}

/// Rejected question weight (only 1, 2 and 3 exist).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("question weight must be 1, 2 or 3, got {0}")]
pub struct InvalidWeight(pub u8);
