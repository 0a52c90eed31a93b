//! The round state machine.
//!
//! `SessionHandle` owns all session-scoped state plus the learner's progress
//! for the duration of one practice session:
//!
//! Ready -> Playing -> (round complete -> Playing)* -> Complete -> Finalized
//!
//! A finished round immediately becomes the next one in data terms; the
//! caller decides whether to show a transition screen in between.

use super::round::RoundState;
use super::summary::{
    ResultCalculator, SessionFacts, SessionSummary, StandardResultCalculator,
};
use crate::achievements::{check_achievements, AchievementId};
use crate::core::clock::seconds_between;
use crate::core::leveling::progress_to_next_level;
use crate::error::{EngineError, EngineResult};
use crate::progress::UserProgress;
use crate::scoring::{
    calculate_points, perfect_round_bonus, stars_for_answer, PointsBreakdown, ScoreState,
};
use crate::words::{Word, WordId};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Set up, nothing answered yet.
    Ready,
    Playing,
    /// Every word mastered; waiting for `complete_session`.
    Complete,
    /// `complete_session` has run.
    Finalized,
}

/// Outcome of one submitted answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitResult {
    pub is_correct: bool,
    pub is_first_try: bool,
    pub correct_spelling: String,
    pub time_taken_seconds: f64,
    pub points: PointsBreakdown,
    pub stars: u8,
    /// Non-zero only when this answer finished a perfect round.
    pub perfect_bonus: u32,
    pub round_complete: bool,
    /// Round the answer belonged to.
    pub answered_round: u32,
    /// Round now in play (advanced when `round_complete` and words remain).
    pub round_number: u32,
    pub current_index: usize,
    pub combo_count: u32,
    pub combo_multiplier: u32,
    pub leveled_up: bool,
    pub all_words_mastered: bool,
}

/// Everything the caller needs to persist and celebrate a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSession {
    pub summary: SessionSummary,
    pub progress: UserProgress,
    pub new_achievements: Vec<AchievementId>,
    pub level_before: u32,
    pub level_after: u32,
}

impl CompletedSession {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}

pub struct SessionHandle {
    all_words: Vec<Word>,
    round: RoundState,
    score: ScoreState,
    progress: UserProgress,
    starting_level: u32,
    help_budget: u32,
    help_coins_used: u32,
    words_attempted: u32,
    had_initial_mistakes: bool,
    started_at: DateTime<Utc>,
    word_presented_at: DateTime<Utc>,
    phase: SessionPhase,
    calculator: Box<dyn ResultCalculator>,
}

impl SessionHandle {
    /// Starts a session over `words` (already in display order).
    pub fn setup(
        words: Vec<Word>,
        initial_help_budget: u32,
        mut progress: UserProgress,
        now: DateTime<Utc>,
    ) -> EngineResult<Self> {
        if words.is_empty() {
            return Err(EngineError::Validation(
                "no words provided to setup".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for word in &words {
            if !seen.insert(word.id) {
                return Err(EngineError::Validation(format!(
                    "duplicate word id {} ('{}')",
                    word.id, word.text
                )));
            }
            if word.text.trim().is_empty() {
                return Err(EngineError::Validation("blank word in list".to_string()));
            }
        }

        progress.recompute_level();
        info!(
            "Session started: {} words, {} help coins",
            words.len(),
            initial_help_budget
        );

        Ok(Self {
            round: RoundState::new(&words),
            all_words: words,
            score: ScoreState::new(),
            starting_level: progress.level(),
            progress,
            help_budget: initial_help_budget,
            help_coins_used: 0,
            words_attempted: 0,
            had_initial_mistakes: false,
            started_at: now,
            word_presented_at: now,
            phase: SessionPhase::Ready,
            calculator: Box::new(StandardResultCalculator),
        })
    }

    /// Swaps the summary builder.
    pub fn with_result_calculator(mut self, calculator: impl ResultCalculator + 'static) -> Self {
        self.calculator = Box::new(calculator);
        self
    }

    /// Grades an answer for the current word and advances the state machine.
    pub fn submit_answer(
        &mut self,
        word_id: WordId,
        raw_answer: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<SubmitResult> {
        let word = self.active_word()?.clone();
        if word.id != word_id {
            return Err(EngineError::InvariantViolation(format!(
                "answer submitted for {} but the current word is {}",
                word_id, word.id
            )));
        }

        self.phase = SessionPhase::Playing;
        self.words_attempted += 1;

        let is_correct = word.matches(raw_answer);
        let is_first_try = self.round.is_first_try(word.id);
        let time_taken = seconds_between(self.word_presented_at, now);

        if !is_correct && !self.had_initial_mistakes {
            self.had_initial_mistakes = true;
        }
        self.round.record(word.id, is_correct);

        let mut leveled_up = false;
        let (points, stars) = if is_correct {
            let combo = self.score.record_hit();
            let points = calculate_points(true, combo, Some(time_taken), is_first_try);
            let stars = stars_for_answer(Some(time_taken), is_first_try);
            self.score.add_points(points.total_points);
            self.score.add_stars(stars);
            leveled_up |= self.progress.award(points.total_points, stars);
            (points, stars)
        } else {
            self.score.record_miss();
            (PointsBreakdown::miss(), 0)
        };

        debug!(
            "'{}' answered {:?}: correct={} points={} stars={} combo={}",
            word.text, raw_answer, is_correct, points.total_points, stars, self.score.combo_count
        );

        let answered_round = self.round.round_number;
        let mut round_complete = false;
        let mut perfect_bonus = 0;

        if !self.round.is_last_word() {
            self.round.current_index += 1;
        } else {
            round_complete = true;
            if self.round.is_perfect() {
                perfect_bonus = perfect_round_bonus();
                self.score.add_perfect_round(perfect_bonus);
                leveled_up |= self.progress.award(perfect_bonus, 0);
            }

            if self.round.all_mastered(&self.all_words) {
                self.phase = SessionPhase::Complete;
                info!(
                    "All {} words mastered after {} round(s)",
                    self.all_words.len(),
                    answered_round
                );
            } else {
                self.round.begin_next_round(&self.all_words);
                info!(
                    "Round {} complete, {} word(s) left for round {}",
                    answered_round,
                    self.round.words_in_round.len(),
                    self.round.round_number
                );
            }
        }
        self.word_presented_at = now;

        Ok(SubmitResult {
            is_correct,
            is_first_try,
            correct_spelling: word.text,
            time_taken_seconds: time_taken,
            points,
            stars,
            perfect_bonus,
            round_complete,
            answered_round,
            round_number: self.round.round_number,
            current_index: self.round.current_index,
            combo_count: self.score.combo_count,
            combo_multiplier: self.score.combo_multiplier(),
            leveled_up,
            all_words_mastered: self.phase == SessionPhase::Complete,
        })
    }

    /// Grades an answer for whatever word is current.
    pub fn answer_current(
        &mut self,
        raw_answer: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<SubmitResult> {
        let word_id = self.active_word()?.id;
        self.submit_answer(word_id, raw_answer, now)
    }

    /// Reveals the correct prefix of the current word plus one more letter.
    ///
    /// Costs one coin unless `typed` already spells the whole word, in which
    /// case the word is returned for free.
    pub fn use_help_coin(&mut self, typed: &str) -> EngineResult<String> {
        let word = self.active_word()?;
        let target: Vec<char> = word.text.chars().collect();

        let matched = typed
            .chars()
            .zip(target.iter())
            .take_while(|(typed_char, target_char)| chars_match(*typed_char, **target_char))
            .count();

        if matched >= target.len() {
            return Ok(word.text.clone());
        }
        if self.help_budget == 0 {
            return Err(EngineError::HelpBudgetExhausted);
        }

        let revealed: String = target[..=matched].iter().collect();
        self.help_budget -= 1;
        self.help_coins_used += 1;
        debug!("Help coin used, {} left", self.help_budget);
        Ok(revealed)
    }

    /// Restarts the answer timer, e.g. after a round transition screen.
    pub fn restart_word_timer(&mut self, now: DateTime<Utc>) {
        self.word_presented_at = now;
    }

    /// Builds the summary, counts the session in progress and unlocks
    /// achievements. Runs once, after every word is mastered.
    pub fn complete_session(&mut self, now: DateTime<Utc>) -> EngineResult<CompletedSession> {
        match self.phase {
            SessionPhase::Complete => {}
            SessionPhase::Finalized => {
                return Err(EngineError::InvariantViolation(
                    "session already completed".to_string(),
                ))
            }
            SessionPhase::Ready | SessionPhase::Playing => {
                return Err(EngineError::InvariantViolation(format!(
                    "session not complete: {} of {} words mastered",
                    self.round.mastered.len(),
                    self.all_words.len()
                )))
            }
        }

        let facts = SessionFacts {
            round: &self.round,
            score: &self.score,
            total_words: self.all_words.len(),
            words_attempted: self.words_attempted,
            help_coins_used: self.help_coins_used,
            had_initial_mistakes: self.had_initial_mistakes,
            elapsed_seconds: seconds_between(self.started_at, now),
        };
        let summary = self.calculator.calculate_result(&facts);

        self.progress
            .record_session(summary.words_mastered as u64, now.date_naive());
        let new_achievements = check_achievements(&summary, &mut self.progress);
        self.phase = SessionPhase::Finalized;

        info!(
            "Session complete: {} points, {} stars, level {} -> {}",
            summary.points_earned,
            summary.stars_earned,
            self.starting_level,
            self.progress.level()
        );

        Ok(CompletedSession {
            summary,
            progress: self.progress.clone(),
            new_achievements,
            level_before: self.starting_level,
            level_after: self.progress.level(),
        })
    }

    fn active_word(&self) -> EngineResult<&Word> {
        match self.phase {
            SessionPhase::Ready | SessionPhase::Playing => {
                self.round.current_word().ok_or_else(|| {
                    EngineError::InvariantViolation("round has no current word".to_string())
                })
            }
            SessionPhase::Complete | SessionPhase::Finalized => Err(
                EngineError::InvariantViolation("no active word: session is complete".to_string()),
            ),
        }
    }

    // =========================================================================
    // Read-only accessors
    // =========================================================================

    pub fn current_word(&self) -> Option<&Word> {
        self.active_word().ok()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, SessionPhase::Complete | SessionPhase::Finalized)
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.score.combo_multiplier()
    }

    pub fn help_budget(&self) -> u32 {
        self.help_budget
    }

    pub fn help_coins_used(&self) -> u32 {
        self.help_coins_used
    }

    pub fn words_attempted(&self) -> u32 {
        self.words_attempted
    }

    pub fn all_words(&self) -> &[Word] {
        &self.all_words
    }

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    /// Mastered share of the whole list.
    pub fn mastery_fraction(&self) -> f64 {
        self.round.mastered.len() as f64 / self.all_words.len() as f64
    }

    pub fn round_fraction(&self) -> f64 {
        if self.is_complete() {
            return 1.0;
        }
        self.round.round_fraction()
    }

    pub fn level_progress(&self) -> f64 {
        progress_to_next_level(self.progress.level(), self.progress.experience_points)
    }
}

fn chars_match(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
