//! Adaptive quiz engine core for young learners.
//!
//! Provides:
//! - Fuzzy answer matching tolerant of misspellings and phrasing variance
//! - Type-dispatched grading (multiple-choice, numeric, free text)
//! - XP/coin reward scoring
//! - Spaced-repetition question scheduling with adaptive difficulty
//! - JSON question-pool loading and validation
//!
//! The core is synchronous and pure over caller-supplied data: it owns no
//! storage, clock or global randomness. Callers supply the question pool
//! and a per-question stats snapshot before each call and persist the
//! updated stats afterward.

pub mod error;
pub mod grading;
pub mod matching;
pub mod pool;
pub mod scheduling;
pub mod scoring;
pub mod text;
pub mod types;

pub use error::{PoolError, Result};
pub use grading::{grade, parse_numeric};
pub use matching::{FuzzyMatcher, MatchConfig};
pub use scheduling::{review, select_next};
pub use scoring::calculate_score;
pub use text::{levenshtein, normalize, normalized_similarity};
pub use types::{
    Answer, MatchMethod, PerformanceStat, Question, QuestionKind, ScoreResult, SessionState,
    Verdict,
};
