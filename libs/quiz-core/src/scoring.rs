//! Reward calculation.
//!
//! Pure function from correctness context (difficulty, timing, streak,
//! hint usage) to XP points and coins.

use crate::types::ScoreResult;

/// Calculate the reward for an answered question.
///
/// Base points come from the difficulty tier, answering fast adds up to
/// 10 bonus points, every 3 correct answers in a row add a 10% multiplier
/// (uncapped), and using the hint costs 30% of the total.
pub fn calculate_score(
    difficulty: u8,
    time_remaining: f64,
    total_time: f64,
    current_streak: u32,
    hint_used: bool,
) -> ScoreResult {
    let base_points: u32 = match difficulty {
        1 => 10,
        2 => 15,
        3 => 20,
        _ => 10,
    };

    let time_bonus = if total_time > 0.0 {
        ((time_remaining / total_time) * 10.0).round() as u32
    } else {
        0
    };

    let streak_multiplier = 1.0 + f64::from(current_streak / 3) * 0.1;

    let mut raw = f64::from(base_points + time_bonus) * streak_multiplier;
    if hint_used {
        raw *= 0.7;
    }

    let points = raw.round() as u32;
    let coins = points / 5;

    ScoreResult {
        points,
        coins,
        base_points,
        time_bonus,
        streak_multiplier,
        hint_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn base_points_by_difficulty() {
        assert_eq!(calculate_score(1, 0.0, 30.0, 0, false).base_points, 10);
        assert_eq!(calculate_score(2, 0.0, 30.0, 0, false).base_points, 15);
        assert_eq!(calculate_score(3, 0.0, 30.0, 0, false).base_points, 20);
        // Unrecognized difficulty falls back to the easy tier.
        assert_eq!(calculate_score(7, 0.0, 30.0, 0, false).base_points, 10);
    }

    #[test]
    fn full_time_left_gives_full_bonus() {
        let score = calculate_score(1, 30.0, 30.0, 0, false);
        assert_eq!(score.time_bonus, 10);
        assert_eq!(score.points, 20);
        assert_eq!(score.coins, 4);
    }

    #[test]
    fn half_time_gives_half_bonus() {
        assert_eq!(calculate_score(1, 15.0, 30.0, 0, false).time_bonus, 5);
        assert_eq!(calculate_score(1, 0.0, 30.0, 0, false).time_bonus, 0);
    }

    #[test]
    fn streak_multiplier_steps_every_three() {
        assert_eq!(calculate_score(1, 30.0, 30.0, 0, false).streak_multiplier, 1.0);
        assert_eq!(calculate_score(1, 30.0, 30.0, 2, false).streak_multiplier, 1.0);
        assert_eq!(calculate_score(1, 30.0, 30.0, 3, false).streak_multiplier, 1.1);
        assert_eq!(calculate_score(1, 30.0, 30.0, 9, false).streak_multiplier, 1.3);
    }

    #[test]
    fn hint_costs_thirty_percent() {
        let without = calculate_score(1, 30.0, 30.0, 0, false);
        let with = calculate_score(1, 30.0, 30.0, 0, true);
        assert_eq!(with.points, (f64::from(without.points) * 0.7).round() as u32);
    }

    #[test]
    fn coins_are_one_per_five_points() {
        let score = calculate_score(3, 30.0, 30.0, 6, false);
        assert_eq!(score.coins, score.points / 5);
    }
}
