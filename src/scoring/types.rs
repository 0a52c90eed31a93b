use super::logic::combo_multiplier;
use crate::core::constants::MAX_STARS_PER_WORD;
use serde::{Deserialize, Serialize};

/// Itemized points for one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    pub base_points: u32,
    pub combo_multiplier: u32,
    pub speed_bonus: u32,
    pub total_points: u32,
}

impl PointsBreakdown {
    /// A miss: nothing awarded, neutral multiplier.
    pub fn miss() -> Self {
        Self {
            base_points: 0,
            combo_multiplier: 1,
            speed_bonus: 0,
            total_points: 0,
        }
    }
}

/// Running score for one practice session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreState {
    pub points: u64,
    pub combo_count: u32,
    pub best_combo: u32,
    /// Stars earned by each correct answer, in answer order.
    pub stars_per_word: Vec<u8>,
    pub total_stars: u64,
    pub mistakes_since_session_start: u32,
    /// Perfect-round bonuses awarded so far.
    pub perfect_rounds: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always derived from the combo count.
    pub fn combo_multiplier(&self) -> u32 {
        combo_multiplier(self.combo_count)
    }

    /// Extends the combo. Returns the new combo count.
    pub fn record_hit(&mut self) -> u32 {
        self.combo_count += 1;
        self.best_combo = self.best_combo.max(self.combo_count);
        self.combo_count
    }

    pub fn record_miss(&mut self) {
        self.combo_count = 0;
        self.mistakes_since_session_start += 1;
    }

    pub fn add_points(&mut self, points: u32) {
        self.points += points as u64;
    }

    pub fn add_stars(&mut self, stars: u8) {
        let stars = stars.min(MAX_STARS_PER_WORD);
        self.stars_per_word.push(stars);
        self.total_stars += stars as u64;
    }

    pub fn add_perfect_round(&mut self, bonus: u32) {
        self.perfect_rounds += 1;
        self.add_points(bonus);
    }

    /// Average stars per correct answer, 0.0 before any.
    pub fn average_stars(&self) -> f64 {
        if self.stars_per_word.is_empty() {
            return 0.0;
        }
        self.total_stars as f64 / self.stars_per_word.len() as f64
    }
}
