//! Per-language word dictionaries.
//!
//! A [`Dictionary`] answers two questions: is this token a word, and what words
//! might it have been. Dictionaries are loaded once into a [`DictionarySet`] and
//! shared read-only between page workers. A language without a dictionary is a
//! normal deployment state, not an error.

#[cfg(feature = "hunspell")]
pub mod hunspell;
pub mod spellcheck;
pub mod suggest;
pub mod wordlist;

#[cfg(feature = "hunspell")]
pub use hunspell::HunspellDictionary;
pub use spellcheck::{DEFAULT_SUGGESTION_LIMIT, SpellCheckOutcome, check_spelling};
pub use wordlist::WordListDictionary;

use ahash::AHashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Word recognition and correction for a single language.
pub trait Dictionary: Send + Sync {
    /// Whether `word` is a recognized word.
    fn spell(&self, word: &str) -> bool;

    /// Candidate corrections for `word`, best first.
    fn suggest(&self, word: &str) -> Vec<String>;
}

/// Dictionaries keyed by supported language code.
#[derive(Clone, Default)]
pub struct DictionarySet {
    dictionaries: AHashMap<String, Arc<dyn Dictionary>>,
}

impl std::fmt::Debug for DictionarySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionarySet")
            .field("languages", &self.languages())
            .finish()
    }
}

impl DictionarySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dictionary, replacing any previous one for `code`.
    pub fn insert(&mut self, code: impl Into<String>, dictionary: Arc<dyn Dictionary>) {
        self.dictionaries.insert(code.into(), dictionary);
    }

    pub fn with(mut self, code: impl Into<String>, dictionary: impl Dictionary + 'static) -> Self {
        self.insert(code, Arc::new(dictionary));
        self
    }

    pub fn get(&self, code: &str) -> Option<&Arc<dyn Dictionary>> {
        self.dictionaries.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.dictionaries.contains_key(code)
    }

    /// Codes with a loaded dictionary, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.dictionaries.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.dictionaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionaries.is_empty()
    }
}

/// Default hunspell search directories, most specific first.
pub fn default_dictionary_dirs() -> Vec<PathBuf> {
    [
        "/usr/share/hunspell",
        "/usr/share/myspell",
        "/usr/share/myspell/dicts",
        "/usr/local/share/hunspell",
        "/opt/homebrew/share/hunspell",
        "/Library/Spelling",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_lookup() {
        let set = DictionarySet::new().with("en", WordListDictionary::from_words(["hello", "world"]));
        assert!(set.contains("en"));
        assert!(!set.contains("ar"));
        assert_eq!(set.len(), 1);
        assert!(set.get("en").is_some_and(|d| d.spell("hello")));
    }

    #[test]
    fn test_languages_sorted() {
        let set = DictionarySet::new()
            .with("he", WordListDictionary::from_words(["שלום"]))
            .with("ar", WordListDictionary::from_words(["سلام"]));
        assert_eq!(set.languages(), vec!["ar", "he"]);
    }
}
