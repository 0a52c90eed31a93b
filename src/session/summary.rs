//! End-of-session summary and the strategy that builds it.

use super::round::RoundState;
use crate::scoring::ScoreState;
use serde::{Deserialize, Serialize};

/// Aggregated counts for one finished session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Every submitted answer, right or wrong.
    pub words_attempted: u32,
    pub words_mastered: u32,
    /// The whole list was spelled right in round 1.
    pub is_perfect_round: bool,
    pub round_time_seconds: f64,
    pub help_coins_used: u32,
    pub had_initial_mistakes: bool,
    pub all_words_mastered: bool,
    pub rounds_played: u32,
    pub points_earned: u64,
    pub stars_earned: u64,
    pub best_combo: u32,
}

/// Inputs a result calculator may read.
pub struct SessionFacts<'a> {
    pub round: &'a RoundState,
    pub score: &'a ScoreState,
    pub total_words: usize,
    pub words_attempted: u32,
    pub help_coins_used: u32,
    pub had_initial_mistakes: bool,
    pub elapsed_seconds: f64,
}

/// Builds the summary handed to achievements and persistence.
pub trait ResultCalculator {
    fn calculate_result(&self, facts: &SessionFacts<'_>) -> SessionSummary;
}

/// The production calculator.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardResultCalculator;

impl ResultCalculator for StandardResultCalculator {
    fn calculate_result(&self, facts: &SessionFacts<'_>) -> SessionSummary {
        let words_mastered = facts.round.mastered.len() as u32;
        let all_words_mastered = facts.round.mastered.len() == facts.total_words;

        SessionSummary {
            words_attempted: facts.words_attempted,
            words_mastered,
            is_perfect_round: all_words_mastered
                && facts.round.round_number == 1
                && facts.score.mistakes_since_session_start == 0,
            round_time_seconds: facts.elapsed_seconds,
            help_coins_used: facts.help_coins_used,
            had_initial_mistakes: facts.had_initial_mistakes,
            all_words_mastered,
            rounds_played: facts.round.round_number,
            points_earned: facts.score.points,
            stars_earned: facts.score.total_stars,
            best_combo: facts.score.best_combo,
        }
    }
}

impl SessionSummary {
    /// Share of answers that were correct, in [0, 1].
    pub fn accuracy(&self) -> f64 {
        if self.words_attempted == 0 {
            return 0.0;
        }
        self.words_mastered as f64 / self.words_attempted as f64
    }
}
