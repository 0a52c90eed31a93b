//! Static achievement catalog.

use super::types::{AchievementDef, AchievementId};
use crate::core::constants::{SPEED_RUN_MAX_SECONDS, STREAK_ACHIEVEMENT_DAYS, WORD_COLLECTOR_TARGET};
use crate::progress::UserProgress;
use crate::session::SessionSummary;

/// All achievements in evaluation and display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::FirstSession,
        name: "First Steps",
        description: "Finish your first practice session",
        icon: "🎒",
        rule: first_session,
    },
    AchievementDef {
        id: AchievementId::PerfectRound,
        name: "Perfect Round",
        description: "Spell every word right on the first round",
        icon: "💯",
        rule: perfect_round,
    },
    AchievementDef {
        id: AchievementId::SpeedSpeller,
        name: "Speed Speller",
        description: "Master a whole list in under 2 minutes",
        icon: "⚡",
        rule: speed_speller,
    },
    AchievementDef {
        id: AchievementId::WeekStreak,
        name: "Week Warrior",
        description: "Practice 7 days in a row",
        icon: "🔥",
        rule: week_streak,
    },
    AchievementDef {
        id: AchievementId::WordCollector,
        name: "Word Collector",
        description: "Master 50 words",
        icon: "📚",
        rule: word_collector,
    },
    AchievementDef {
        id: AchievementId::NoHelpNeeded,
        name: "All By Myself",
        description: "Finish a session without help coins",
        icon: "🦸",
        rule: no_help_needed,
    },
    AchievementDef {
        id: AchievementId::Comeback,
        name: "Never Give Up",
        description: "Master every word after making mistakes",
        icon: "🌱",
        rule: comeback,
    },
];

fn first_session(_: &SessionSummary, progress: &UserProgress) -> bool {
    progress.total_sessions_completed >= 1
}

fn perfect_round(summary: &SessionSummary, _: &UserProgress) -> bool {
    summary.is_perfect_round
}

fn speed_speller(summary: &SessionSummary, _: &UserProgress) -> bool {
    summary.all_words_mastered && summary.round_time_seconds < SPEED_RUN_MAX_SECONDS
}

fn week_streak(_: &SessionSummary, progress: &UserProgress) -> bool {
    progress.current_streak_days >= STREAK_ACHIEVEMENT_DAYS
}

fn word_collector(_: &SessionSummary, progress: &UserProgress) -> bool {
    progress.total_words_mastered >= WORD_COLLECTOR_TARGET
}

fn no_help_needed(summary: &SessionSummary, _: &UserProgress) -> bool {
    summary.all_words_mastered && summary.help_coins_used == 0
}

fn comeback(summary: &SessionSummary, _: &UserProgress) -> bool {
    summary.had_initial_mistakes && summary.all_words_mastered
}

/// Look up an achievement definition by ID.
pub fn get_achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|a| a.id == id)
}
