//! Practice balance simulator for Monte Carlo analysis.
//!
//! Runs many simulated learners through the real session engine to check:
//! - Points and stars earned per session
//! - How quickly learners level up
//! - How many retry rounds a list takes
//! - How often each achievement unlocks

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_learner};
