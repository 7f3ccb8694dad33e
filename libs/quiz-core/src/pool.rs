//! Question pool admission.
//!
//! The pool's transport format is a JSON array of question records (the
//! external contract of the surrounding application). Loading validates the
//! per-kind field invariants here so grading and scheduling can assume
//! well-formed questions.

use crate::error::{PoolError, Result};
use crate::types::{Question, QuestionKind};
use std::collections::HashSet;

/// Parse a JSON array of question records, validating each one.
///
/// Rejects the whole pool on the first malformed record or duplicate id.
pub fn load(json: &str) -> Result<Vec<Question>> {
    let questions: Vec<Question> = serde_json::from_str(json)?;

    let mut seen_ids = HashSet::new();
    for question in &questions {
        validate(question)?;
        if !seen_ids.insert(question.id.clone()) {
            return Err(PoolError::DuplicateId {
                id: question.id.clone(),
            });
        }
    }

    Ok(questions)
}

/// Check the field invariants for a single question record.
pub fn validate(question: &Question) -> Result<()> {
    if !(1..=3).contains(&question.difficulty) {
        return Err(PoolError::InvalidDifficulty {
            id: question.id.clone(),
            difficulty: question.difficulty,
        });
    }

    match question.kind {
        QuestionKind::MultipleChoice => {
            if question.options.len() < 2 {
                return Err(PoolError::NotEnoughOptions {
                    id: question.id.clone(),
                });
            }
            match question.correct_option_index {
                None => Err(PoolError::MissingOptionIndex {
                    id: question.id.clone(),
                }),
                Some(index) if index >= question.options.len() => {
                    Err(PoolError::OptionIndexOutOfBounds {
                        id: question.id.clone(),
                        index,
                        option_count: question.options.len(),
                    })
                }
                Some(_) => Ok(()),
            }
        }
        QuestionKind::Numeric => {
            if question.numeric_answer.is_none() {
                return Err(PoolError::MissingNumericAnswer {
                    id: question.id.clone(),
                });
            }
            if question.numeric_tolerance.is_some_and(|t| t < 0.0) {
                return Err(PoolError::NegativeTolerance {
                    id: question.id.clone(),
                });
            }
            Ok(())
        }
        QuestionKind::FreeText => {
            if question.acceptable_answers.is_empty() {
                return Err(PoolError::MissingAcceptableAnswers {
                    id: question.id.clone(),
                });
            }
            Ok(())
        }
    }
}
