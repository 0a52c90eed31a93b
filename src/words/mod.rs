//! Target words and the sources that supply them.

pub mod source;
pub mod types;

pub use source::{InMemoryWordSource, JsonWordSource, WordListFile, WordSource};
pub use types::{normalize_answer, order_words, Word, WordId};
