//! Learner progress and its durable storage.
//!
//! Progress is loaded once when a session starts and saved once after it
//! completes. Save failures keep the in-memory record intact so the caller
//! can retry.

pub mod persist;
pub mod session_log;
pub mod store;
pub mod types;

pub use persist::{persist_completion, session_log_entry, SaveReport};
pub use session_log::{
    streak_days, JsonSessionLog, MemorySessionLog, SessionLog, SessionLogEntry,
};
pub use store::{FileProgressStore, MemoryProgressStore, ProgressStore};
pub use types::UserProgress;
