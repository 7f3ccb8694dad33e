//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using PoolError.
pub type Result<T> = std::result::Result<T, PoolError>;

/// Errors raised while admitting question records into the pool.
///
/// Grading and scheduling never return these; they assume questions that
/// already passed validation.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("invalid question JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate question id {id:?}")]
    DuplicateId { id: String },

    #[error("question {id:?}: multiple-choice needs at least two options")]
    NotEnoughOptions { id: String },

    #[error("question {id:?}: correct option index {index} out of bounds for {option_count} options")]
    OptionIndexOutOfBounds {
        id: String,
        index: usize,
        option_count: usize,
    },

    #[error("question {id:?}: multiple-choice needs a correct option index")]
    MissingOptionIndex { id: String },

    #[error("question {id:?}: free-text needs at least one acceptable answer")]
    MissingAcceptableAnswers { id: String },

    #[error("question {id:?}: numeric needs a numeric answer")]
    MissingNumericAnswer { id: String },

    #[error("question {id:?}: numeric tolerance must not be negative")]
    NegativeTolerance { id: String },

    #[error("question {id:?}: difficulty {difficulty} is outside 1..=3")]
    InvalidDifficulty { id: String, difficulty: u8 },
}
