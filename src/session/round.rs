//! Round bookkeeping: which words are in play and which are mastered.

use crate::words::{Word, WordId};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct RoundState {
    pub round_number: u32,
    pub words_in_round: Vec<Word>,
    pub current_index: usize,
    pub round_results: HashMap<WordId, bool>,
    pub mastered: HashSet<WordId>,
}

impl RoundState {
    /// Round 1 with every word in play.
    pub fn new(all_words: &[Word]) -> Self {
        Self {
            round_number: 1,
            words_in_round: all_words.to_vec(),
            current_index: 0,
            round_results: HashMap::new(),
            mastered: HashSet::new(),
        }
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.words_in_round.get(self.current_index)
    }

    pub fn is_last_word(&self) -> bool {
        self.current_index + 1 >= self.words_in_round.len()
    }

    /// No recorded answer for this word in the current round.
    pub fn is_first_try(&self, word_id: WordId) -> bool {
        !self.round_results.contains_key(&word_id)
    }

    pub fn record(&mut self, word_id: WordId, is_correct: bool) {
        self.round_results.insert(word_id, is_correct);
        if is_correct {
            self.mastered.insert(word_id);
        }
    }

    /// Every word in a non-empty round was answered correctly.
    pub fn is_perfect(&self) -> bool {
        !self.words_in_round.is_empty()
            && self.round_results.len() == self.words_in_round.len()
            && self.round_results.values().all(|&correct| correct)
    }

    pub fn all_mastered(&self, all_words: &[Word]) -> bool {
        all_words.iter().all(|w| self.mastered.contains(&w.id))
    }

    /// Starts the next round with the unmastered words, in original order.
    pub fn begin_next_round(&mut self, all_words: &[Word]) {
        self.words_in_round = all_words
            .iter()
            .filter(|w| !self.mastered.contains(&w.id))
            .cloned()
            .collect();
        self.round_results.clear();
        self.current_index = 0;
        self.round_number += 1;
    }

    /// Position within the current round as a fraction in [0, 1].
    pub fn round_fraction(&self) -> f64 {
        if self.words_in_round.is_empty() {
            return 1.0;
        }
        self.current_index as f64 / self.words_in_round.len() as f64
    }
}
