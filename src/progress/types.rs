use crate::achievements::AchievementId;
use crate::core::leveling::{level_from_experience, progress_to_next_level};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Learner progress persisted across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub total_points: u64,
    pub total_stars: u64,
    /// Derived from `experience_points`; only written by `recompute_level`.
    level: u32,
    pub experience_points: u64,
    pub unlocked_achievements: BTreeSet<AchievementId>,
    pub total_words_mastered: u64,
    pub total_sessions_completed: u64,
    pub current_streak_days: u32,
    pub best_streak_days: u32,
    pub last_session_date: Option<NaiveDate>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            total_points: 0,
            total_stars: 0,
            level: 1,
            experience_points: 0,
            unlocked_achievements: BTreeSet::new(),
            total_words_mastered: 0,
            total_sessions_completed: 0,
            current_streak_days: 0,
            best_streak_days: 0,
            last_session_date: None,
        }
    }
}

impl UserProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Fraction of the way to the next level.
    pub fn level_progress(&self) -> f64 {
        progress_to_next_level(self.level, self.experience_points)
    }

    /// Adds points (1 point = 1 XP) and stars. Returns true on level-up.
    pub fn award(&mut self, points: u32, stars: u8) -> bool {
        let before = self.level;
        self.total_points += points as u64;
        self.total_stars += stars as u64;
        self.experience_points += points as u64;
        self.recompute_level();
        self.level > before
    }

    /// Re-derives the level from experience. Also repairs records loaded
    /// from an older save whose level drifted.
    pub fn recompute_level(&mut self) {
        self.level = level_from_experience(self.experience_points);
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked_achievements.contains(&id)
    }

    /// Returns true if newly unlocked. The set never shrinks.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        self.unlocked_achievements.insert(id)
    }

    /// Counts a finished session and rolls the day streak forward to `date`.
    pub fn record_session(&mut self, words_mastered: u64, date: NaiveDate) {
        self.total_words_mastered += words_mastered;
        self.total_sessions_completed += 1;
        self.update_streak(date);
    }

    fn update_streak(&mut self, date: NaiveDate) {
        self.current_streak_days = match self.last_session_date {
            Some(last) if last == date => self.current_streak_days.max(1),
            Some(last) if last.succ_opt() == Some(date) => self.current_streak_days + 1,
            // Clock moved backwards: keep the streak, don't rewind the date
            Some(last) if last > date => return,
            _ => 1,
        };
        self.best_streak_days = self.best_streak_days.max(self.current_streak_days);
        self.last_session_date = Some(date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_new_progress_is_level_one() {
        let progress = UserProgress::new();
        assert_eq!(progress.level(), 1);
        assert_eq!(progress.experience_points, 0);
        assert!(progress.unlocked_achievements.is_empty());
    }

    #[test]
    fn test_award_recomputes_level() {
        let mut progress = UserProgress::new();
        assert!(!progress.award(99, 2));
        assert_eq!(progress.level(), 1);
        assert!(progress.award(1, 1));
        assert_eq!(progress.level(), 2);
        assert_eq!(progress.total_points, 100);
        assert_eq!(progress.total_stars, 3);
        assert_eq!(progress.level(), level_from_experience(progress.experience_points));
    }

    #[test]
    fn test_award_can_skip_levels() {
        let mut progress = UserProgress::new();
        assert!(progress.award(800, 0));
        assert_eq!(progress.level(), 5);
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let mut progress = UserProgress::new();
        assert!(progress.unlock(AchievementId::FirstSession));
        assert!(!progress.unlock(AchievementId::FirstSession));
        assert_eq!(progress.unlocked_achievements.len(), 1);
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let mut progress = UserProgress::new();
        progress.record_session(2, day(1));
        progress.record_session(2, day(2));
        progress.record_session(2, day(2));
        progress.record_session(2, day(3));
        assert_eq!(progress.current_streak_days, 3);
        assert_eq!(progress.total_sessions_completed, 4);
        assert_eq!(progress.total_words_mastered, 8);
    }

    #[test]
    fn test_streak_resets_after_gap() {
        let mut progress = UserProgress::new();
        progress.record_session(1, day(1));
        progress.record_session(1, day(2));
        progress.record_session(1, day(5));
        assert_eq!(progress.current_streak_days, 1);
        assert_eq!(progress.best_streak_days, 2);
    }

    #[test]
    fn test_streak_ignores_backwards_clock() {
        let mut progress = UserProgress::new();
        progress.record_session(1, day(4));
        progress.record_session(1, day(3));
        assert_eq!(progress.current_streak_days, 1);
        assert_eq!(progress.last_session_date, Some(day(4)));
        assert_eq!(progress.total_sessions_completed, 2);
    }
}
