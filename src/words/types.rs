use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a word within a word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordId(pub Uuid);

impl WordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A target word. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub text: String,
    /// Explicit position in the list. `None` keeps creation order.
    #[serde(default)]
    pub display_order: Option<u32>,
}

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: WordId::new(),
            text: text.into(),
            display_order: None,
        }
    }

    pub fn with_order(text: impl Into<String>, display_order: u32) -> Self {
        Self {
            display_order: Some(display_order),
            ..Self::new(text)
        }
    }

    /// Whether `raw_answer` spells this word, ignoring case and outer whitespace.
    pub fn matches(&self, raw_answer: &str) -> bool {
        normalize_answer(raw_answer) == normalize_answer(&self.text)
    }

    /// Number of characters in the word.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Trim surrounding whitespace and case-fold.
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Sort by `display_order`, falling back to creation order. Words without an
/// order sort after ordered ones.
pub fn order_words(words: Vec<Word>) -> Vec<Word> {
    let mut indexed: Vec<(usize, Word)> = words.into_iter().enumerate().collect();
    indexed.sort_by_key(|(index, word)| (word.display_order.unwrap_or(u32::MAX), *index));
    indexed.into_iter().map(|(_, word)| word).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_ignores_case_and_whitespace() {
        let word = Word::new("Cat");
        assert!(word.matches("cat"));
        assert!(word.matches("  CAT \n"));
        assert!(!word.matches("cats"));
        assert!(!word.matches("c at"));
    }

    #[test]
    fn test_word_ids_are_unique() {
        let a = Word::new("cat");
        let b = Word::new("cat");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_order_words_by_display_order() {
        let words = vec![
            Word::with_order("third", 3),
            Word::with_order("first", 1),
            Word::with_order("second", 2),
        ];
        let ordered: Vec<_> = order_words(words).into_iter().map(|w| w.text).collect();
        assert_eq!(ordered, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_order_words_falls_back_to_creation_order() {
        let words = vec![
            Word::new("dog"),
            Word::with_order("cat", 1),
            Word::new("ant"),
            Word::with_order("bee", 1),
        ];
        let ordered: Vec<_> = order_words(words).into_iter().map(|w| w.text).collect();
        assert_eq!(ordered, vec!["cat", "bee", "dog", "ant"]);
    }

    #[test]
    fn test_word_len_counts_chars() {
        assert_eq!(Word::new("café").len(), 4);
    }
}
