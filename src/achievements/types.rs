//! Achievement identifiers and rule definitions.

use crate::progress::UserProgress;
use crate::session::SessionSummary;
use serde::{Deserialize, Serialize};

/// Unique identifier for each achievement. Declaration order is catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AchievementId {
    FirstSession,
    PerfectRound,
    SpeedSpeller,  // whole list in under 2 minutes
    WeekStreak,    // 7 days in a row
    WordCollector, // 50 words mastered across all sessions
    NoHelpNeeded,
    Comeback, // finished after early mistakes
}

/// Unlock predicate, evaluated after the session has been counted in progress.
pub type AchievementRule = fn(&SessionSummary, &UserProgress) -> bool;

/// Static definition of an achievement.
#[derive(Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rule: AchievementRule,
}

impl AchievementDef {
    pub fn is_met(&self, summary: &SessionSummary, progress: &UserProgress) -> bool {
        (self.rule)(summary, progress)
    }
}

impl std::fmt::Debug for AchievementDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AchievementDef")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}
