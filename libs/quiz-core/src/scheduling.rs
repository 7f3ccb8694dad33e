//! Question selection and spaced repetition.
//!
//! [`select_next`] is a greedy, stateless-per-call strategy: the caller
//! re-invokes it after every graded answer with the current session state
//! and a fresh stats snapshot. [`review`] produces the updated
//! [`PerformanceStat`] for the caller to persist.

use crate::types::{PerformanceStat, Question, SessionState};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::HashMap;

/// Select the question to present next, or `None` if the pool is empty.
///
/// Filtering stages, in order, each with a fallback so selection never
/// fails on a non-empty pool:
/// 1. exclude questions already asked this session;
/// 2. if everything was asked, repeat the least recently answered question;
/// 3. prefer questions due for review (`next_due_at <= now`, or never seen);
/// 4. with dynamic difficulty on, steer toward harder questions above 80%
///    session accuracy and easy ones below 50%;
/// 5. among what remains, pick uniformly at random from the questions with
///    the fewest graded attempts.
///
/// The random source is injected so callers and tests control determinism.
pub fn select_next<'a, R: Rng + ?Sized>(
    pool: &'a [Question],
    stats: &HashMap<String, PerformanceStat>,
    session: &SessionState,
    dynamic_difficulty: bool,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Option<&'a Question> {
    let available: Vec<&Question> = pool
        .iter()
        .filter(|q| !session.asked_question_ids.contains(&q.id))
        .collect();

    if available.is_empty() {
        return select_least_recent(pool, stats);
    }

    let due: Vec<&Question> = available
        .iter()
        .copied()
        .filter(|q| match stats.get(&q.id) {
            Some(stat) => stat.next_due_at <= now,
            None => true,
        })
        .collect();

    // Spaced repetition is a preference, not a hard gate.
    let mut candidates = if due.is_empty() { available } else { due };

    if dynamic_difficulty {
        if let Some(accuracy) = session.accuracy() {
            candidates = apply_dynamic_difficulty(candidates, accuracy);
        }
    }

    select_least_practiced(&candidates, stats, rng)
}

/// Exhaustion fallback: the question answered longest ago, never-answered
/// questions first, ties broken by pool order.
fn select_least_recent<'a>(
    pool: &'a [Question],
    stats: &HashMap<String, PerformanceStat>,
) -> Option<&'a Question> {
    let mut oldest: Option<(Option<DateTime<Utc>>, &Question)> = None;

    for question in pool {
        let last_answered = stats.get(&question.id).map(PerformanceStat::last_answered_at);
        match oldest {
            Some((time, _)) if last_answered >= time => {}
            _ => oldest = Some((last_answered, question)),
        }
    }

    oldest.map(|(_, question)| question)
}

/// Restrict candidates by difficulty based on running accuracy. An empty
/// restriction falls back to the unrestricted set.
fn apply_dynamic_difficulty(candidates: Vec<&Question>, accuracy: f64) -> Vec<&Question> {
    let filtered: Vec<&Question> = if accuracy > 0.8 {
        candidates.iter().copied().filter(|q| q.difficulty >= 2).collect()
    } else if accuracy < 0.5 {
        candidates.iter().copied().filter(|q| q.difficulty == 1).collect()
    } else {
        return candidates;
    };

    if filtered.is_empty() {
        candidates
    } else {
        filtered
    }
}

/// Uniform random pick among the candidates with the fewest attempts.
fn select_least_practiced<'a, R: Rng + ?Sized>(
    candidates: &[&'a Question],
    stats: &HashMap<String, PerformanceStat>,
    rng: &mut R,
) -> Option<&'a Question> {
    let mut min_attempts = u32::MAX;
    let mut least_practiced: Vec<&Question> = Vec::new();

    for &question in candidates {
        let attempts = stats.get(&question.id).map_or(0, PerformanceStat::attempts);

        if attempts < min_attempts {
            min_attempts = attempts;
            least_practiced.clear();
            least_practiced.push(question);
        } else if attempts == min_attempts {
            least_practiced.push(question);
        }
    }

    if least_practiced.is_empty() {
        None
    } else {
        Some(least_practiced[rng.gen_range(0..least_practiced.len())])
    }
}

/// Fold a graded answer into a question's spaced repetition state.
///
/// A correct answer grows the ease factor by 0.1 (capped at 3.0) and
/// multiplies the interval by 2.5; an incorrect one shrinks the ease by 0.2
/// (floored at 1.3) and resets the interval to one minute. The returned
/// stat is due again `interval_minutes` from `now`; the caller persists it.
pub fn review(
    stat: Option<&PerformanceStat>,
    correct: bool,
    now: DateTime<Utc>,
) -> PerformanceStat {
    let current = stat.cloned().unwrap_or_else(|| PerformanceStat::new(now));

    let mut updated = if correct {
        PerformanceStat {
            ease_factor: (current.ease_factor + 0.1).min(3.0),
            interval_minutes: (f64::from(current.interval_minutes) * 2.5).ceil() as u32,
            correct_count: current.correct_count + 1,
            ..current
        }
    } else {
        PerformanceStat {
            ease_factor: (current.ease_factor - 0.2).max(1.3),
            interval_minutes: 1,
            wrong_count: current.wrong_count + 1,
            ..current
        }
    };

    updated.next_due_at = now + Duration::minutes(i64::from(updated.interval_minutes));
    updated
}
