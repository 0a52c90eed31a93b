//! Level curve: maps total experience to a level and a progress fraction.
//!
//! Level is always derived from experience, never stored independently.

use super::constants::{XP_CURVE_BASE, XP_CURVE_EXPONENT};

/// Total experience required to reach `level`.
///
/// Exact for every `u32` level: the largest value, about 2.8e16, fits in `u64`.
pub fn experience_for_level(level: u32) -> u64 {
    if level <= 1 {
        return 0;
    }
    // floor(100 * m^1.5) == isqrt(10_000 * m^3), computed exactly in integers
    let m = (level - 1) as u128;
    let base = XP_CURVE_BASE as u128;
    isqrt(base * base * m * m * m) as u64
}

fn isqrt(n: u128) -> u128 {
    let mut root = (n as f64).sqrt() as u128;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// The highest level whose experience requirement is met by `xp`.
pub fn level_from_experience(xp: u64) -> u32 {
    // Invert the curve for a starting guess, then correct for float rounding.
    let estimate = (xp as f64 / XP_CURVE_BASE).powf(1.0 / XP_CURVE_EXPONENT) + 1.0;
    // Float-to-int `as` saturates, so huge totals start at u32::MAX
    let mut level = (estimate.floor() as u32).max(1);

    while level > 1 && experience_for_level(level) > xp {
        level -= 1;
    }
    while level < u32::MAX && experience_for_level(level + 1) <= xp {
        level += 1;
    }
    level
}

/// Fraction of the way from `current_level` to the next one, in [0, 1].
pub fn progress_to_next_level(current_level: u32, current_xp: u64) -> f64 {
    let floor = experience_for_level(current_level);
    let ceiling = experience_for_level(current_level.saturating_add(1));
    let span = ceiling.saturating_sub(floor);
    if span == 0 {
        return 1.0;
    }
    let earned = current_xp as f64 - floor as f64;
    (earned / span as f64).clamp(0.0, 1.0)
}

/// Experience still missing before the next level.
pub fn experience_to_next_level(current_xp: u64) -> u64 {
    let level = level_from_experience(current_xp);
    experience_for_level(level.saturating_add(1)).saturating_sub(current_xp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_for_level_known_values() {
        assert_eq!(experience_for_level(0), 0);
        assert_eq!(experience_for_level(1), 0);
        assert_eq!(experience_for_level(2), 100);
        assert_eq!(experience_for_level(3), 282);
        assert_eq!(experience_for_level(5), 800);
    }

    #[test]
    fn test_experience_curve_strictly_increasing() {
        for level in 1..200 {
            assert!(
                experience_for_level(level + 1) > experience_for_level(level),
                "curve flat at level {}",
                level
            );
        }
    }

    #[test]
    fn test_level_from_experience_boundaries() {
        assert_eq!(level_from_experience(0), 1);
        assert_eq!(level_from_experience(99), 1);
        assert_eq!(level_from_experience(100), 2);
        assert_eq!(level_from_experience(281), 2);
        assert_eq!(level_from_experience(282), 3);
    }

    #[test]
    fn test_level_from_experience_matches_curve() {
        for level in 1..150 {
            let xp = experience_for_level(level);
            assert_eq!(level_from_experience(xp), level);
            if xp > 0 {
                assert_eq!(level_from_experience(xp - 1), level - 1);
            }
        }
    }

    #[test]
    fn test_level_from_experience_has_no_low_cap() {
        // Level 1001 needs 3_162_277 XP
        assert_eq!(experience_for_level(1_001), 3_162_277);
        assert_eq!(level_from_experience(3_162_277), 1_001);
        assert_eq!(level_from_experience(3_162_276), 1_000);

        for level in [5_000, 250_000, 10_000_000] {
            let xp = experience_for_level(level);
            assert_eq!(level_from_experience(xp), level);
            assert_eq!(level_from_experience(xp - 1), level - 1);
        }
    }

    #[test]
    fn test_level_from_experience_extremes() {
        let top = experience_for_level(u32::MAX);
        assert!(top > experience_for_level(u32::MAX - 1));
        assert_eq!(level_from_experience(top), u32::MAX);
        assert_eq!(level_from_experience(u64::MAX), u32::MAX);
        assert_eq!(progress_to_next_level(u32::MAX, u64::MAX), 1.0);
        assert_eq!(experience_to_next_level(u64::MAX), 0);
    }

    #[test]
    fn test_progress_to_next_level() {
        assert_eq!(progress_to_next_level(1, 0), 0.0);
        assert!((progress_to_next_level(1, 50) - 0.5).abs() < 1e-9);
        assert_eq!(progress_to_next_level(2, 282), 1.0);
        // Below the level floor clamps to zero
        assert_eq!(progress_to_next_level(3, 10), 0.0);
    }

    #[test]
    fn test_progress_zero_span_is_full() {
        assert_eq!(progress_to_next_level(0, 0), 1.0);
    }

    #[test]
    fn test_experience_to_next_level() {
        assert_eq!(experience_to_next_level(0), 100);
        assert_eq!(experience_to_next_level(250), 32);
    }
}
