//! Answer grading.
//!
//! Dispatches a submitted answer against the question kind. Multiple-choice
//! and numeric grading are all-or-nothing; free text goes through the
//! [`FuzzyMatcher`]. Grading is total: malformed input grades as incorrect,
//! it never returns an error.

use crate::matching::{FuzzyMatcher, MatchConfig};
use crate::types::{Answer, MatchMethod, Question, QuestionKind, Verdict};

/// Grade a submitted answer. `None` models a missing answer (the session
/// timed out before the learner responded) and is always incorrect.
pub fn grade(
    question: &Question,
    answer: Option<&Answer>,
    matcher: &FuzzyMatcher,
    config: &MatchConfig,
) -> Verdict {
    let Some(answer) = answer else {
        return Verdict::incorrect();
    };

    match question.kind {
        QuestionKind::MultipleChoice => grade_multiple_choice(question, answer),
        QuestionKind::Numeric => grade_numeric(question, answer),
        QuestionKind::FreeText => match answer {
            Answer::Text(text) => {
                matcher.match_answer(text, &question.acceptable_answers, config)
            }
            _ => Verdict::incorrect(),
        },
    }
}

fn grade_multiple_choice(question: &Question, answer: &Answer) -> Verdict {
    let correct = matches!(answer, Answer::Choice(index)
        if Some(*index) == question.correct_option_index);
    Verdict::binary(correct, MatchMethod::Exact)
}

fn grade_numeric(question: &Question, answer: &Answer) -> Verdict {
    let value = match answer {
        Answer::Number(value) => Some(*value),
        // Untagged deserialization yields Choice for whole numbers.
        Answer::Choice(index) => Some(*index as f64),
        Answer::Text(text) => parse_numeric(text),
    };

    let Some(value) = value else {
        return Verdict::incorrect();
    };
    let Some(expected) = question.numeric_answer else {
        return Verdict::incorrect();
    };

    let tolerance = question.numeric_tolerance.unwrap_or(0.0);
    Verdict::binary((value - expected).abs() <= tolerance, MatchMethod::Exact)
}

/// Parse a numeric answer the way a child might type it.
///
/// Tolerates the currency markers the question sets use (`N$`, `R`, `$`),
/// stray whitespace, comma as decimal point and simple `num/den` fractions.
/// Returns `None` for anything else rather than guessing.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let stripped = text.replace("N$", "").replace("n$", "");
    let cleaned: String = stripped
        .chars()
        .filter(|c| !matches!(c, '$' | 'R' | 'r') && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    if let Some((numerator, denominator)) = cleaned.split_once('/') {
        let numerator: i64 = numerator.parse().ok()?;
        let denominator: i64 = denominator.parse().ok()?;
        if denominator == 0 {
            return None;
        }
        return Some(numerator as f64 / denominator as f64);
    }

    cleaned.parse().ok()
}
