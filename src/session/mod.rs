//! Practice session engine: rounds, grading and end-of-session summary.

pub mod engine;
pub mod round;
pub mod summary;

pub use engine::{CompletedSession, SessionHandle, SessionPhase, SubmitResult};
pub use round::RoundState;
pub use summary::{ResultCalculator, SessionFacts, SessionSummary, StandardResultCalculator};
