//! Achievement evaluation.

use super::data::ALL_ACHIEVEMENTS;
use super::types::AchievementId;
use crate::progress::UserProgress;
use crate::session::SessionSummary;

/// Unlocks every satisfied, not-yet-unlocked achievement.
///
/// Returns the newly unlocked IDs in catalog order. Running it again with the
/// same inputs returns an empty list.
pub fn check_achievements(
    summary: &SessionSummary,
    progress: &mut UserProgress,
) -> Vec<AchievementId> {
    let mut newly_unlocked = Vec::new();

    for def in ALL_ACHIEVEMENTS {
        if progress.is_unlocked(def.id) || !def.is_met(summary, progress) {
            continue;
        }
        progress.unlock(def.id);
        tracing::info!("Achievement unlocked: {}", def.name);
        newly_unlocked.push(def.id);
    }

    newly_unlocked
}

/// (unlocked, total) for display.
pub fn unlock_counts(progress: &UserProgress) -> (usize, usize) {
    let unlocked = ALL_ACHIEVEMENTS
        .iter()
        .filter(|a| progress.is_unlocked(a.id))
        .count();
    (unlocked, ALL_ACHIEVEMENTS.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished_summary() -> SessionSummary {
        SessionSummary {
            words_attempted: 3,
            words_mastered: 2,
            is_perfect_round: false,
            round_time_seconds: 200.0,
            help_coins_used: 1,
            had_initial_mistakes: true,
            all_words_mastered: true,
            ..SessionSummary::default()
        }
    }

    #[test]
    fn test_unlocks_in_catalog_order() {
        let mut progress = UserProgress::new();
        progress.total_sessions_completed = 1;

        let unlocked = check_achievements(&finished_summary(), &mut progress);
        assert_eq!(
            unlocked,
            vec![AchievementId::FirstSession, AchievementId::Comeback]
        );
        assert!(progress.is_unlocked(AchievementId::Comeback));
    }

    #[test]
    fn test_second_check_is_empty() {
        let mut progress = UserProgress::new();
        progress.total_sessions_completed = 1;
        let summary = finished_summary();

        assert!(!check_achievements(&summary, &mut progress).is_empty());
        assert!(check_achievements(&summary, &mut progress).is_empty());
    }

    #[test]
    fn test_already_unlocked_not_reported() {
        let mut progress = UserProgress::new();
        progress.total_sessions_completed = 3;
        progress.unlock(AchievementId::FirstSession);

        let unlocked = check_achievements(&finished_summary(), &mut progress);
        assert_eq!(unlocked, vec![AchievementId::Comeback]);
    }

    #[test]
    fn test_perfect_fast_session_unlocks_several() {
        let mut progress = UserProgress::new();
        progress.total_sessions_completed = 1;
        let summary = SessionSummary {
            words_attempted: 4,
            words_mastered: 4,
            is_perfect_round: true,
            round_time_seconds: 40.0,
            help_coins_used: 0,
            had_initial_mistakes: false,
            all_words_mastered: true,
            ..SessionSummary::default()
        };

        let unlocked = check_achievements(&summary, &mut progress);
        assert_eq!(
            unlocked,
            vec![
                AchievementId::FirstSession,
                AchievementId::PerfectRound,
                AchievementId::SpeedSpeller,
                AchievementId::NoHelpNeeded,
            ]
        );
        assert_eq!(unlock_counts(&progress), (4, 7));
    }

    #[test]
    fn test_unlocked_set_only_grows() {
        let mut progress = UserProgress::new();
        progress.unlock(AchievementId::WeekStreak);
        // Streak is 0 now, but the unlock stays
        check_achievements(&SessionSummary::default(), &mut progress);
        assert!(progress.is_unlocked(AchievementId::WeekStreak));
    }
}
