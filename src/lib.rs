//! Spellquest - spelling practice progression engine
//!
//! Turns a word list into rounds, grades typed answers, tracks
//! score/combo/stars, levels the learner up and unlocks achievements.
//! Rendering, audio and sync are left to the caller.

pub mod achievements;
pub mod config;
pub mod core;
pub mod error;
pub mod progress;
pub mod scoring;
pub mod session;
pub mod simulator;
pub mod utils;
pub mod words;

pub use achievements::{check_achievements, AchievementId};
pub use crate::core::clock::{Clock, FixedClock, SystemClock};
pub use error::{EngineError, EngineResult, PersistenceError};
pub use progress::UserProgress;
pub use session::{CompletedSession, SessionHandle, SessionPhase, SessionSummary, SubmitResult};
pub use words::{Word, WordId};
