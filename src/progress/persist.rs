//! Saving a finished session through the storage collaborators.

use super::session_log::{SessionLog, SessionLogEntry};
use super::store::ProgressStore;
use crate::error::PersistenceError;
use crate::session::CompletedSession;
use chrono::NaiveDate;

/// Which parts of a finished session reached durable storage.
#[derive(Debug, Default)]
pub struct SaveReport {
    pub progress_error: Option<PersistenceError>,
    pub log_error: Option<PersistenceError>,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.progress_error.is_none() && self.log_error.is_none()
    }

    /// Message for the learner, `None` when everything was saved.
    pub fn user_message(&self) -> Option<&'static str> {
        if self.is_complete() {
            None
        } else {
            Some("progress saved partially")
        }
    }
}

/// The log entry recorded for a finished session.
pub fn session_log_entry(
    test_id: &str,
    completed: &CompletedSession,
    date: NaiveDate,
) -> SessionLogEntry {
    SessionLogEntry {
        test_id: test_id.to_string(),
        words_attempted: completed.summary.words_attempted,
        words_correct: completed.summary.words_mastered,
        streak_value: completed.progress.current_streak_days,
        date,
    }
}

/// Saves progress, then appends the session to the log.
///
/// Failures are reported, never raised: `completed` is left untouched so the
/// caller can retry with the same value.
pub fn persist_completion(
    store: &mut dyn ProgressStore,
    log: &mut dyn SessionLog,
    test_id: &str,
    completed: &CompletedSession,
    date: NaiveDate,
) -> SaveReport {
    let mut report = SaveReport::default();

    if let Err(e) = store.save(&completed.progress) {
        tracing::warn!("Failed to save progress: {}", e);
        report.progress_error = Some(e);
    }

    if let Err(e) = log.append(session_log_entry(test_id, completed, date)) {
        tracing::warn!("Failed to append session log: {}", e);
        report.log_error = Some(e);
    }

    report
}
