//! Simulation runner driving the real session engine.
//!
//! A learner model picks answers and answer times; every grading, scoring
//! and unlock decision comes from `SessionHandle`, so results match real play.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::core::clock::{Clock, FixedClock};
use crate::error::EngineResult;
use crate::progress::UserProgress;
use crate::session::SessionHandle;
use crate::words::Word;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Safety valve: a learner this stuck gets the word right.
const MAX_ROUNDS_PER_SESSION: u32 = 50;

/// 2024-01-01T09:00:00Z
const SIM_START_TIMESTAMP: i64 = 1_704_099_600;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> EngineResult<SimReport> {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_learner(config, &mut rng)?;

        if config.verbosity >= 2 {
            println!(
                "Learner {}/{} - Level {}, {} points, {} stars, {} achievements",
                run_idx + 1,
                config.num_runs,
                stats.final_level,
                stats.total_points,
                stats.total_stars,
                stats.achievements.len()
            );
        }
        all_runs.push(stats);
    }

    Ok(SimReport::from_runs(all_runs))
}

/// Plays every session of one learner.
pub fn simulate_learner<R: Rng>(config: &SimConfig, rng: &mut R) -> EngineResult<RunStats> {
    let clock = FixedClock::at_timestamp(SIM_START_TIMESTAMP);
    let mut progress = UserProgress::new();
    let mut stats = RunStats::default();

    for session_idx in 0..config.sessions_per_run {
        let words = (0..config.words_per_session.max(1))
            .map(|i| Word::new(format!("word{}x{}", session_idx, i)))
            .collect();

        let mut session = SessionHandle::setup(words, config.help_coins, progress, clock.now())?;

        while let Some(word) = session.current_word().cloned() {
            let round = session.round().round_number;

            if rng.gen_bool(config.help_chance.clamp(0.0, 1.0)) {
                // Running out of coins is fine here, the learner just answers
                let _ = session.use_help_coin("");
            }

            let accuracy = (config.accuracy + config.retry_accuracy_gain * (round - 1) as f64)
                .clamp(0.0, 1.0);
            let correct = round >= MAX_ROUNDS_PER_SESSION || rng.gen_bool(accuracy);
            let answer = if correct {
                word.text.clone()
            } else {
                format!("{}?", word.text)
            };

            let seconds = if rng.gen_bool(config.fast_answer_chance.clamp(0.0, 1.0)) {
                rng.gen_range(1.0..=5.0)
            } else {
                rng.gen_range(5.5..=20.0)
            };
            clock.advance_secs(seconds);

            session.submit_answer(word.id, &answer, clock.now())?;
        }

        let completed = session.complete_session(clock.now())?;
        stats.sessions += 1;
        stats.total_rounds += completed.summary.rounds_played as u64;
        if completed.summary.is_perfect_round {
            stats.perfect_sessions += 1;
        }
        stats.achievements.extend(completed.new_achievements.iter().copied());
        progress = completed.progress;

        clock.advance_days(config.days_between_sessions.max(0));
    }

    stats.total_points = progress.total_points;
    stats.total_stars = progress.total_stars;
    stats.final_level = progress.level();
    Ok(stats)
}
