use super::types::PointsBreakdown;
use crate::core::constants::{
    BASE_POINTS, COMBO_THRESHOLDS, FAST_ANSWER_SECONDS, MAX_COMBO_MULTIPLIER,
    PERFECT_ROUND_BONUS, SPEED_BONUS_MAX_SECONDS, SPEED_BONUS_POINTS,
};

/// Multiplier for a combo streak of `combo_count` correct answers.
pub fn combo_multiplier(combo_count: u32) -> u32 {
    let steps = COMBO_THRESHOLDS
        .iter()
        .filter(|&&threshold| combo_count >= threshold)
        .count() as u32;
    (1 + steps).min(MAX_COMBO_MULTIPLIER)
}

/// Points for one answer. `combo_count` already includes this answer.
pub fn calculate_points(
    is_correct: bool,
    combo_count: u32,
    time_taken_seconds: Option<f64>,
    _is_first_try: bool,
) -> PointsBreakdown {
    if !is_correct {
        return PointsBreakdown::miss();
    }

    let multiplier = combo_multiplier(combo_count);
    let speed_bonus = match time_taken_seconds {
        Some(secs) if secs <= SPEED_BONUS_MAX_SECONDS => SPEED_BONUS_POINTS,
        _ => 0,
    };

    PointsBreakdown {
        base_points: BASE_POINTS,
        combo_multiplier: multiplier,
        speed_bonus,
        total_points: (BASE_POINTS + speed_bonus) * multiplier,
    }
}

/// Stars for a correct answer (1-3).
pub fn stars_for_answer(time_taken_seconds: Option<f64>, is_first_try: bool) -> u8 {
    if !is_first_try {
        return 1;
    }
    match time_taken_seconds {
        Some(secs) if secs <= FAST_ANSWER_SECONDS => 3,
        _ => 2,
    }
}

/// Stars for any graded answer; misses earn nothing.
pub fn stars_for_result(is_correct: bool, time_taken_seconds: Option<f64>, is_first_try: bool) -> u8 {
    if is_correct {
        stars_for_answer(time_taken_seconds, is_first_try)
    } else {
        0
    }
}

/// Flat bonus for finishing a round without a miss.
pub fn perfect_round_bonus() -> u32 {
    PERFECT_ROUND_BONUS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_multiplier_tiers() {
        for combo in 0..=1 {
            assert_eq!(combo_multiplier(combo), 1);
        }
        for combo in 2..=4 {
            assert_eq!(combo_multiplier(combo), 2);
        }
        for combo in 5..=9 {
            assert_eq!(combo_multiplier(combo), 3);
        }
        for combo in [10, 11, 50, u32::MAX] {
            assert_eq!(combo_multiplier(combo), 4);
        }
    }

    #[test]
    fn test_calculate_points_fast_combo() {
        let points = calculate_points(true, 2, Some(3.0), true);
        assert_eq!(points.base_points, 10);
        assert_eq!(points.speed_bonus, 5);
        assert_eq!(points.combo_multiplier, 2);
        assert_eq!(points.total_points, 30);
    }

    #[test]
    fn test_calculate_points_slow_single() {
        let points = calculate_points(true, 1, Some(12.0), true);
        assert_eq!(points.speed_bonus, 0);
        assert_eq!(points.total_points, 10);
    }

    #[test]
    fn test_calculate_points_unknown_time_has_no_bonus() {
        let points = calculate_points(true, 10, None, false);
        assert_eq!(points.speed_bonus, 0);
        assert_eq!(points.total_points, 40);
    }

    #[test]
    fn test_speed_bonus_boundary_is_inclusive() {
        assert_eq!(calculate_points(true, 0, Some(5.0), true).speed_bonus, 5);
        assert_eq!(calculate_points(true, 0, Some(5.001), true).speed_bonus, 0);
    }

    #[test]
    fn test_incorrect_answer_scores_nothing() {
        for combo in [0, 3, 12] {
            let points = calculate_points(false, combo, Some(1.0), true);
            assert_eq!(points.total_points, 0);
            assert_eq!(points.base_points, 0);
            assert_eq!(points.speed_bonus, 0);
            assert_eq!(points.combo_multiplier, 1);
        }
    }

    #[test]
    fn test_stars_for_answer() {
        assert_eq!(stars_for_answer(Some(2.0), true), 3);
        assert_eq!(stars_for_answer(Some(5.0), true), 3);
        assert_eq!(stars_for_answer(Some(8.0), true), 2);
        assert_eq!(stars_for_answer(None, true), 2);
        assert_eq!(stars_for_answer(Some(1.0), false), 1);
    }

    #[test]
    fn test_stars_for_result_miss_is_zero() {
        assert_eq!(stars_for_result(false, Some(1.0), true), 0);
        assert_eq!(stars_for_result(true, Some(1.0), true), 3);
    }

    #[test]
    fn test_perfect_round_bonus() {
        assert_eq!(perfect_round_bonus(), 50);
    }
}
