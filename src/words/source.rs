//! Word list collaborators.

use super::types::{order_words, Word, WordId};
use crate::error::{EngineError, EngineResult, PersistenceError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Supplies the ordered words of a spelling test.
pub trait WordSource {
    /// Words of `test_id`, sorted by display order then creation order.
    fn load_words(&self, test_id: &str) -> EngineResult<Vec<Word>>;

    /// Known test ids, sorted.
    fn test_ids(&self) -> EngineResult<Vec<String>>;
}

/// Word lists held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWordSource {
    lists: BTreeMap<String, Vec<Word>>,
}

impl InMemoryWordSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a list built from plain strings in the given order.
    pub fn with_list(mut self, test_id: &str, words: &[&str]) -> Self {
        let words = words.iter().map(|text| Word::new(*text)).collect();
        self.insert(test_id, words);
        self
    }

    pub fn insert(&mut self, test_id: &str, words: Vec<Word>) {
        self.lists.insert(test_id.to_string(), words);
    }
}

impl WordSource for InMemoryWordSource {
    fn load_words(&self, test_id: &str) -> EngineResult<Vec<Word>> {
        let words = self
            .lists
            .get(test_id)
            .ok_or_else(|| EngineError::Validation(format!("unknown word list '{}'", test_id)))?;
        Ok(order_words(words.clone()))
    }

    fn test_ids(&self) -> EngineResult<Vec<String>> {
        Ok(self.lists.keys().cloned().collect())
    }
}

/// One entry of a word list file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordEntry {
    #[serde(default)]
    pub id: Option<WordId>,
    pub text: String,
    #[serde(default)]
    pub display_order: Option<u32>,
}

/// On-disk word list format: `{ "lists": { "<test id>": [ {"text": ...}, ... ] } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordListFile {
    #[serde(default)]
    pub lists: BTreeMap<String, Vec<WordEntry>>,
}

impl WordListFile {
    /// A small starter set used when no word list file exists yet.
    pub fn starter() -> Self {
        let mut lists = BTreeMap::new();
        let animals = ["cat", "dog", "fish", "bird", "horse"];
        let colors = ["red", "blue", "green", "yellow", "purple"];
        for (name, words) in [("animals", animals), ("colors", colors)] {
            let entries = words
                .iter()
                .enumerate()
                .map(|(i, text)| WordEntry {
                    id: None,
                    text: text.to_string(),
                    display_order: Some(i as u32),
                })
                .collect();
            lists.insert(name.to_string(), entries);
        }
        Self { lists }
    }
}

/// Word lists read from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonWordSource {
    path: PathBuf,
}

impl JsonWordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the starter lists if the file does not exist yet.
    pub fn ensure_exists(&self) -> Result<(), PersistenceError> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&WordListFile::starter())?;
        fs::write(&self.path, json)?;
        tracing::info!("Created starter word lists at {}", self.path.display());
        Ok(())
    }

    fn read_file(&self) -> EngineResult<WordListFile> {
        let json = fs::read_to_string(&self.path).map_err(PersistenceError::from)?;
        let file = serde_json::from_str(&json).map_err(PersistenceError::from)?;
        Ok(file)
    }
}

impl WordSource for JsonWordSource {
    fn load_words(&self, test_id: &str) -> EngineResult<Vec<Word>> {
        let file = self.read_file()?;
        let entries = file
            .lists
            .get(test_id)
            .ok_or_else(|| EngineError::Validation(format!("unknown word list '{}'", test_id)))?;

        let words = entries
            .iter()
            .filter(|entry| !entry.text.trim().is_empty())
            .map(|entry| Word {
                id: entry.id.unwrap_or_default(),
                text: entry.text.trim().to_string(),
                display_order: entry.display_order,
            })
            .collect();
        Ok(order_words(words))
    }

    fn test_ids(&self) -> EngineResult<Vec<String>> {
        Ok(self.read_file()?.lists.into_keys().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn temp_path(name: &str) -> PathBuf {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir()
            .join(format!("spellquest-words-{}-{}", std::process::id(), id))
            .join(name)
    }

    #[test]
    fn test_in_memory_source_keeps_order() {
        let source = InMemoryWordSource::new().with_list("week1", &["cat", "dog", "sun"]);
        let words = source.load_words("week1").unwrap();
        let texts: Vec<_> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["cat", "dog", "sun"]);
    }

    #[test]
    fn test_unknown_list_is_validation_error() {
        let source = InMemoryWordSource::new();
        let err = source.load_words("missing").unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn test_json_source_sorts_and_skips_blank_entries() {
        let path = temp_path("lists.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{"lists": {"week2": [
                {"text": "zebra", "display_order": 2},
                {"text": "  "},
                {"text": " apple ", "display_order": 1}
            ]}}"#,
        )
        .unwrap();

        let source = JsonWordSource::new(&path);
        let words = source.load_words("week2").unwrap();
        let texts: Vec<_> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["apple", "zebra"]);
        assert_eq!(source.test_ids().unwrap(), vec!["week2".to_string()]);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_ensure_exists_writes_starter_lists() {
        let path = temp_path("starter.json");
        let source = JsonWordSource::new(&path);
        source.ensure_exists().unwrap();

        let ids = source.test_ids().unwrap();
        assert_eq!(ids, vec!["animals".to_string(), "colors".to_string()]);
        assert_eq!(source.load_words("animals").unwrap().len(), 5);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_persistence_error() {
        let source = JsonWordSource::new(temp_path("nope.json"));
        let err = source.load_words("animals").unwrap_err();
        assert!(matches!(err, EngineError::Persistence(_)));
    }
}
