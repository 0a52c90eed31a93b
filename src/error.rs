//! Error types for the progression engine and its storage collaborators.

use thiserror::Error;

/// Failures raised by the progression engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Bad input rejected before any session state exists.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Programmer error: the call sequence broke the session state machine.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("No help coins left")]
    HelpBudgetExhausted,

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl EngineError {
    /// True for errors that only a buggy caller can produce.
    pub fn is_programmer_error(&self) -> bool {
        matches!(self, EngineError::InvariantViolation(_))
    }
}

/// Failures while loading or saving durable state.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Corrupted save: {0}")]
    Corrupted(String),

    /// Raised by in-memory stores configured to fail.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_violation_is_programmer_error() {
        let err = EngineError::InvariantViolation("wrong word".to_string());
        assert!(err.is_programmer_error());
        assert!(!EngineError::HelpBudgetExhausted.is_programmer_error());
    }

    #[test]
    fn test_persistence_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: EngineError = PersistenceError::from(io).into();
        assert!(matches!(err, EngineError::Persistence(PersistenceError::Io(_))));
        assert!(err.to_string().contains("gone"));
    }
}
