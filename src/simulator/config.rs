//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated learners
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Practice sessions per learner
    pub sessions_per_run: u32,

    /// Words in each session's list
    pub words_per_session: u32,

    /// Chance of spelling a word right in round 1
    pub accuracy: f64,

    /// Accuracy gained on each retry round
    pub retry_accuracy_gain: f64,

    /// Chance of answering within the speed-bonus window
    pub fast_answer_chance: f64,

    /// Chance of spending a help coin before answering
    pub help_chance: f64,

    /// Help coins per session
    pub help_coins: u32,

    /// Calendar days between sessions (1 = daily practice)
    pub days_between_sessions: i64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per learner)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            sessions_per_run: 30,
            words_per_session: 10,
            accuracy: 0.8,
            retry_accuracy_gain: 0.1,
            fast_answer_chance: 0.5,
            help_chance: 0.1,
            help_coins: 3,
            days_between_sessions: 1,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for a strong, fast speller
    pub fn strong_speller() -> Self {
        Self {
            accuracy: 0.97,
            fast_answer_chance: 0.9,
            help_chance: 0.0,
            ..Default::default()
        }
    }

    /// Quick config for a beginner who needs many retries
    pub fn struggling_speller() -> Self {
        Self {
            accuracy: 0.45,
            retry_accuracy_gain: 0.15,
            fast_answer_chance: 0.1,
            help_chance: 0.4,
            ..Default::default()
        }
    }
}
