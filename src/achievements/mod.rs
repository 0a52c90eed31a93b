//! Achievement system module.
//!
//! A fixed, ordered catalog of unlock rules evaluated once per finished
//! session. Unlocked IDs are stored in the learner's `UserProgress`.

pub mod data;
pub mod logic;
pub mod types;

pub use data::{get_achievement_def, ALL_ACHIEVEMENTS};
pub use logic::{check_achievements, unlock_counts};
pub use types::{AchievementDef, AchievementId, AchievementRule};
