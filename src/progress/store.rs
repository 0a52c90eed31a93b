//! Durable storage for [`UserProgress`].

use super::types::UserProgress;
use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::error::PersistenceError;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const PROGRESS_FILE: &str = "progress.dat";

/// Load/save contract for the learner's progress record.
pub trait ProgressStore {
    /// The saved record, or a zeroed one on first use.
    fn load_progress(&self) -> UserProgress;

    fn save(&mut self, progress: &UserProgress) -> Result<(), PersistenceError>;
}

/// Saves progress to disk in a checksummed binary format.
pub struct FileProgressStore {
    save_path: PathBuf,
}

impl FileProgressStore {
    /// Stores `progress.dat` inside `data_dir`, creating the directory.
    pub fn new(data_dir: &Path) -> Result<Self, PersistenceError> {
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            save_path: data_dir.join(PROGRESS_FILE),
        })
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Writes the record.
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Serialized progress (variable length)
    /// - SHA256 checksum (32 bytes)
    pub fn write(&self, progress: &UserProgress) -> Result<(), PersistenceError> {
        let data = bincode::serialize(progress)?;
        let data_len = data.len() as u32;
        let checksum = checksum(data_len, &data);

        // Write to a sibling file first so a crash never truncates the old save
        let tmp_path = self.save_path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
            file.write_all(&data_len.to_le_bytes())?;
            file.write_all(&data)?;
            file.write_all(&checksum)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.save_path)?;
        Ok(())
    }

    /// Reads and verifies the record.
    ///
    /// Fails if the file is missing, has the wrong version magic, fails the
    /// checksum, or cannot be decoded.
    pub fn read(&self) -> Result<UserProgress, PersistenceError> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(PersistenceError::Corrupted(format!(
                "unknown save version {:#x}",
                version
            )));
        }

        let mut len_bytes = [0u8; 4];
        file.read_exact(&mut len_bytes)?;
        let data_len = u32::from_le_bytes(len_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        if checksum(data_len, &data).as_slice() != stored_checksum {
            return Err(PersistenceError::Corrupted(
                "checksum verification failed".to_string(),
            ));
        }

        let mut progress: UserProgress = bincode::deserialize(&data)?;
        progress.recompute_level();
        Ok(progress)
    }
}

fn checksum(data_len: u32, data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
    hasher.update(data_len.to_le_bytes());
    hasher.update(data);
    hasher.finalize().to_vec()
}

impl ProgressStore for FileProgressStore {
    fn load_progress(&self) -> UserProgress {
        if !self.save_exists() {
            return UserProgress::new();
        }
        match self.read() {
            Ok(progress) => progress,
            Err(e) => {
                tracing::warn!(
                    "Could not read {}, starting fresh: {}",
                    self.save_path.display(),
                    e
                );
                UserProgress::new()
            }
        }
    }

    fn save(&mut self, progress: &UserProgress) -> Result<(), PersistenceError> {
        self.write(progress)
    }
}

/// Keeps progress in memory. Can be told to fail saves.
#[derive(Debug, Default, Clone)]
pub struct MemoryProgressStore {
    saved: Option<UserProgress>,
    pub fail_saves: bool,
    pub save_count: u32,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(progress: UserProgress) -> Self {
        Self {
            saved: Some(progress),
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Option<&UserProgress> {
        self.saved.as_ref()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load_progress(&self) -> UserProgress {
        self.saved.clone().unwrap_or_default()
    }

    fn save(&mut self, progress: &UserProgress) -> Result<(), PersistenceError> {
        if self.fail_saves {
            return Err(PersistenceError::Unavailable(
                "progress store offline".to_string(),
            ));
        }
        self.saved = Some(progress.clone());
        self.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn new_for_test() -> FileProgressStore {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "spellquest-store-{}-{}",
            std::process::id(),
            test_id
        ));
        FileProgressStore::new(&dir).unwrap()
    }

    fn sample_progress() -> UserProgress {
        let mut progress = UserProgress::new();
        progress.award(350, 9);
        progress.unlock(AchievementId::FirstSession);
        progress.record_session(4, chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        progress
    }

    #[test]
    fn test_save_and_load() {
        let mut store = new_for_test();
        let progress = sample_progress();
        store.save(&progress).unwrap();

        let loaded = store.read().unwrap();
        assert_eq!(loaded, progress);
        assert_eq!(loaded.level(), 3);
    }

    #[test]
    fn test_load_missing_returns_fresh_progress() {
        let store = new_for_test();
        assert!(!store.save_exists());
        assert_eq!(store.load_progress(), UserProgress::new());
    }

    #[test]
    fn test_load_bad_checksum() {
        let mut store = new_for_test();
        store.save(&sample_progress()).unwrap();

        let mut bytes = fs::read(store.save_path()).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        fs::write(store.save_path(), bytes).unwrap();

        assert!(matches!(store.read(), Err(PersistenceError::Corrupted(_))));
        assert_eq!(store.load_progress(), UserProgress::new());
    }

    #[test]
    fn test_load_wrong_version_magic() {
        let mut store = new_for_test();
        store.save(&sample_progress()).unwrap();

        let mut bytes = fs::read(store.save_path()).unwrap();
        bytes[0] ^= 0x01;
        fs::write(store.save_path(), bytes).unwrap();

        assert!(matches!(store.read(), Err(PersistenceError::Corrupted(_))));
    }

    #[test]
    fn test_load_truncated_file() {
        let mut store = new_for_test();
        store.save(&sample_progress()).unwrap();

        let bytes = fs::read(store.save_path()).unwrap();
        fs::write(store.save_path(), &bytes[..10]).unwrap();

        assert!(matches!(store.read(), Err(PersistenceError::Io(_))));
    }

    #[test]
    fn test_save_overwrites_existing() {
        let mut store = new_for_test();
        store.save(&sample_progress()).unwrap();

        let mut newer = sample_progress();
        newer.award(1_000, 0);
        store.save(&newer).unwrap();

        assert_eq!(store.read().unwrap().total_points, newer.total_points);
    }

    #[test]
    fn test_memory_store_failure_switch() {
        let mut store = MemoryProgressStore::new();
        store.fail_saves = true;
        assert!(store.save(&sample_progress()).is_err());
        assert!(store.saved().is_none());

        store.fail_saves = false;
        store.save(&sample_progress()).unwrap();
        assert_eq!(store.save_count, 1);
        assert_eq!(store.load_progress(), sample_progress());
    }
}
