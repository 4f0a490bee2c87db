//! Stop-word lookup backed by the NLTK lists shipped with the `stop-words` crate.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// Case-insensitive stop-word set.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl StopwordFilter {
    /// The NLTK English list.
    pub fn english() -> Self {
        let stopwords = get(LANGUAGE::English).iter().map(|s| s.to_lowercase()).collect();
        Self { stopwords }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        if self.stopwords.contains(word) {
            return true;
        }
        self.stopwords.contains(&word.to_lowercase())
    }
}
