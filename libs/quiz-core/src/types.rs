//! Core types for the quiz engine.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Question kind, tagged as in the external JSON contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    Numeric,
    FreeText,
}

/// A question record. Immutable once admitted into the pool; only the
/// fields relevant to `kind` are populated (see [`crate::pool::validate`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub prompt: String,
    /// Difficulty tier 1 (easy) to 3 (hard).
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    /// Multiple-choice only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Multiple-choice only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option_index: Option<usize>,
    /// Free-text only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acceptable_answers: Vec<String>,
    /// Numeric only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_answer: Option<f64>,
    /// Numeric only. Defaults to exact match when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_tolerance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

fn default_difficulty() -> u8 {
    1
}

/// A submitted answer. `None` at the grading call site models a missing
/// answer (e.g. the session timer expired before the learner responded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// Option index for a multiple-choice question.
    Choice(usize),
    /// Numeric value, submitted directly.
    Number(f64),
    /// Free text, or a numeric answer typed as text ("N$ 3,5", "3/4").
    Text(String),
}

/// Per-question spaced repetition state. Owned and persisted by the
/// caller; the scheduler reads it as a snapshot, [`crate::scheduling::review`]
/// produces the updated value after each graded answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStat {
    /// Growth multiplier for the review interval, clamped to [1.3, 3.0].
    pub ease_factor: f64,
    pub interval_minutes: u32,
    pub next_due_at: DateTime<Utc>,
    pub correct_count: u32,
    pub wrong_count: u32,
}

impl PerformanceStat {
    /// Fresh stat for a question answered for the first time.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            ease_factor: 2.5,
            interval_minutes: 1,
            next_due_at: now,
            correct_count: 0,
            wrong_count: 0,
        }
    }

    /// Total graded attempts.
    pub fn attempts(&self) -> u32 {
        self.correct_count + self.wrong_count
    }

    /// When the question was last answered, derived from the due date.
    pub fn last_answered_at(&self) -> DateTime<Utc> {
        self.next_due_at - Duration::minutes(i64::from(self.interval_minutes))
    }
}

/// Per-session counters. Reset at session start, discarded at session end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub total_asked: u32,
    pub total_correct: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    pub asked_question_ids: HashSet<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a question was presented.
    pub fn mark_asked(&mut self, question_id: &str) {
        self.asked_question_ids.insert(question_id.to_string());
    }

    /// Record a graded answer, updating streak bookkeeping.
    pub fn record_answer(&mut self, correct: bool) {
        self.total_asked += 1;
        if correct {
            self.total_correct += 1;
            self.current_streak += 1;
            self.max_streak = self.max_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
    }

    /// Running accuracy for this session, `None` before the first answer.
    pub fn accuracy(&self) -> Option<f64> {
        if self.total_asked == 0 {
            None
        } else {
            Some(f64::from(self.total_correct) / f64::from(self.total_asked))
        }
    }
}

/// Strategy that produced a grading verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    None,
    Exact,
    EditDistance,
    Synonym,
    Phonetic,
    Abbreviation,
    Misspelling,
    Partial,
}

impl Default for MatchMethod {
    fn default() -> Self {
        Self::None
    }
}

/// Result of grading a submitted answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub correct: bool,
    /// How strongly the winning strategy believes the answer matches, 0 to 1.
    pub confidence: f64,
    pub method: MatchMethod,
    /// The acceptable answer (as written by the author) that matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_answer: Option<String>,
    /// Closest acceptable answer when nothing matched, for feedback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Verdict {
    /// Verdict for an answer no strategy could match.
    pub fn incorrect() -> Self {
        Self {
            correct: false,
            confidence: 0.0,
            method: MatchMethod::None,
            matched_answer: None,
            suggestion: None,
        }
    }

    /// All-or-nothing verdict for multiple-choice and numeric grading.
    pub fn binary(correct: bool, method: MatchMethod) -> Self {
        Self {
            correct,
            confidence: if correct { 1.0 } else { 0.0 },
            method,
            matched_answer: None,
            suggestion: None,
        }
    }
}

/// Reward breakdown for one correctly or incorrectly answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub points: u32,
    pub coins: u32,
    pub base_points: u32,
    pub time_bonus: u32,
    pub streak_multiplier: f64,
    pub hint_used: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_streak_bookkeeping() {
        let mut session = SessionState::new();
        session.record_answer(true);
        session.record_answer(true);
        session.record_answer(false);
        session.record_answer(true);

        assert_eq!(session.total_asked, 4);
        assert_eq!(session.total_correct, 3);
        assert_eq!(session.current_streak, 1);
        assert_eq!(session.max_streak, 2);
        assert_eq!(session.accuracy(), Some(0.75));
    }

    #[test]
    fn accuracy_is_none_before_first_answer() {
        assert_eq!(SessionState::new().accuracy(), None);
    }

    #[test]
    fn last_answered_derives_from_due_date() {
        let now = Utc::now();
        let stat = PerformanceStat {
            interval_minutes: 10,
            next_due_at: now + Duration::minutes(10),
            ..PerformanceStat::new(now)
        };
        assert_eq!(stat.last_answered_at(), now);
    }

    #[test]
    fn question_kind_uses_kebab_case_tags() {
        let json = serde_json::to_string(&QuestionKind::MultipleChoice).unwrap();
        assert_eq!(json, "\"multiple-choice\"");
        let kind: QuestionKind = serde_json::from_str("\"free-text\"").unwrap();
        assert_eq!(kind, QuestionKind::FreeText);
    }
}
