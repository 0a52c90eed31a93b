//! Append-only log of finished sessions and the day streak derived from it.

use crate::error::PersistenceError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const SESSION_LOG_FILE: &str = "sessions.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLogEntry {
    pub test_id: String,
    pub words_attempted: u32,
    pub words_correct: u32,
    pub streak_value: u32,
    pub date: NaiveDate,
}

pub trait SessionLog {
    fn append(&mut self, entry: SessionLogEntry) -> Result<(), PersistenceError>;

    fn entries(&self) -> Result<Vec<SessionLogEntry>, PersistenceError>;
}

/// Consecutive calendar days with at least one session, ending `today` or
/// the day before. Zero if the learner skipped yesterday and today.
pub fn streak_days(entries: &[SessionLogEntry], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = entries.iter().map(|e| e.date).collect();

    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        cursor = match cursor.pred_opt() {
            Some(prev) => prev,
            None => break,
        };
    }
    streak
}

/// Session log stored as a pretty-printed JSON array.
pub struct JsonSessionLog {
    path: PathBuf,
}

impl JsonSessionLog {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_LOG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JsonSessionLog {
    /// Existing entries for an append. An unreadable file is moved to
    /// `sessions.json.bak` so the log can start over instead of failing forever.
    fn entries_for_append(&self) -> Result<Vec<SessionLogEntry>, PersistenceError> {
        match self.entries() {
            Ok(entries) => Ok(entries),
            Err(PersistenceError::Json(e)) => {
                let backup = self.path.with_extension("json.bak");
                tracing::warn!(
                    "Unreadable session log {} ({}), moved to {}",
                    self.path.display(),
                    e,
                    backup.display()
                );
                fs::rename(&self.path, &backup)?;
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

impl SessionLog for JsonSessionLog {
    fn append(&mut self, entry: SessionLogEntry) -> Result<(), PersistenceError> {
        let mut entries = self.entries_for_append()?;
        entries.push(entry);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&entries)?;

        // Replace by rename so a crash mid-write leaves the old log intact
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn entries(&self) -> Result<Vec<SessionLogEntry>, PersistenceError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// In-memory log. Can be told to fail appends.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionLog {
    entries: Vec<SessionLogEntry>,
    pub fail_appends: bool,
}

impl MemorySessionLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionLog for MemorySessionLog {
    fn append(&mut self, entry: SessionLogEntry) -> Result<(), PersistenceError> {
        if self.fail_appends {
            return Err(PersistenceError::Unavailable(
                "session log offline".to_string(),
            ));
        }
        self.entries.push(entry);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<SessionLogEntry>, PersistenceError> {
        Ok(self.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_on(day: u32) -> SessionLogEntry {
        SessionLogEntry {
            test_id: "week1".to_string(),
            words_attempted: 5,
            words_correct: 4,
            streak_value: 0,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
        }
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn test_streak_empty_log() {
        assert_eq!(streak_days(&[], june(10)), 0);
    }

    #[test]
    fn test_streak_ending_today() {
        let entries = vec![entry_on(8), entry_on(9), entry_on(10), entry_on(10)];
        assert_eq!(streak_days(&entries, june(10)), 3);
    }

    #[test]
    fn test_streak_ending_yesterday_still_counts() {
        let entries = vec![entry_on(8), entry_on(9)];
        assert_eq!(streak_days(&entries, june(10)), 2);
    }

    #[test]
    fn test_streak_broken_by_gap() {
        let entries = vec![entry_on(5), entry_on(6), entry_on(9), entry_on(10)];
        assert_eq!(streak_days(&entries, june(10)), 2);
        assert_eq!(streak_days(&entries, june(12)), 0);
    }

    #[test]
    fn test_json_log_appends() {
        let dir = std::env::temp_dir().join(format!("spellquest-log-{}", std::process::id()));
        let mut log = JsonSessionLog::new(&dir);
        fs::remove_file(log.path()).ok();

        log.append(entry_on(1)).unwrap();
        log.append(entry_on(2)).unwrap();
        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].date, june(2));

        fs::remove_file(log.path()).ok();
    }

    #[test]
    fn test_json_log_recovers_from_truncated_file() {
        let dir = std::env::temp_dir().join(format!(
            "spellquest-log-truncated-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        let mut log = JsonSessionLog::new(&dir);
        let backup = log.path().with_extension("json.bak");
        fs::remove_file(&backup).ok();
        fs::write(log.path(), "[\n  {\n    \"test_id\": \"we").unwrap();

        assert!(log.entries().is_err());
        log.append(entry_on(3)).unwrap();
        log.append(entry_on(4)).unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(streak_days(&entries, june(4)), 2);
        // The broken file is kept for inspection, no temp file is left behind
        assert!(fs::read_to_string(&backup).unwrap().starts_with("[\n  {"));
        assert!(!log.path().with_extension("json.tmp").exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_memory_log_failure_switch() {
        let mut log = MemorySessionLog::new();
        log.fail_appends = true;
        assert!(log.append(entry_on(1)).is_err());
        assert!(log.entries().unwrap().is_empty());
    }
}
