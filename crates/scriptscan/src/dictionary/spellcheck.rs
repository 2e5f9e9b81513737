//! Spellcheck and correction suggestions for a text in a given language.

use super::DictionarySet;
use crate::text::tokenize;
use crate::{Result, ScriptscanError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Number of distinct misspelled tokens that receive suggestions.
///
/// Suggestion generation dominates spellcheck latency, so tokens beyond this
/// bound are listed as misspelled but left without suggestions. Override it
/// through `LanguageConfig::suggestion_limit`.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Result of spellchecking one text unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellCheckOutcome {
    pub words_checked: usize,
    /// Unrecognized tokens in text order, duplicates included.
    pub misspelled_words: Vec<String>,
    pub misspelled_count: usize,
    /// Suggestions for the first distinct misspelled tokens, in first-seen order.
    pub suggestions: IndexMap<String, Vec<String>>,
}

/// Check `text` against the dictionary for `language`.
///
/// # Errors
///
/// Returns `ScriptscanError::DictionaryUnavailable` when no dictionary is loaded
/// for `language`, so callers can tell "no dictionary" apart from "no errors".
pub fn check_spelling(
    dictionaries: &DictionarySet,
    text: &str,
    language: &str,
    suggestion_limit: usize,
) -> Result<SpellCheckOutcome> {
    let dictionary = dictionaries
        .get(language)
        .ok_or_else(|| ScriptscanError::dictionary_unavailable(language))?;

    let words = tokenize(text);
    let misspelled_words: Vec<String> = words
        .iter()
        .filter(|word| !dictionary.spell(word))
        .map(|word| word.to_string())
        .collect();

    let mut suggestions: IndexMap<String, Vec<String>> = IndexMap::new();
    for word in &misspelled_words {
        if suggestions.len() >= suggestion_limit {
            break;
        }
        if !suggestions.contains_key(word) {
            suggestions.insert(word.clone(), dictionary.suggest(word));
        }
    }

    tracing::debug!(
        language,
        words_checked = words.len(),
        misspelled = misspelled_words.len(),
        "Spellcheck complete"
    );

    Ok(SpellCheckOutcome {
        words_checked: words.len(),
        misspelled_count: misspelled_words.len(),
        misspelled_words,
        suggestions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{Dictionary, WordListDictionary};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingDictionary {
        suggest_calls: AtomicUsize,
    }

    impl Dictionary for CountingDictionary {
        fn spell(&self, word: &str) -> bool {
            word == "ok"
        }

        fn suggest(&self, _word: &str) -> Vec<String> {
            self.suggest_calls.fetch_add(1, Ordering::SeqCst);
            vec!["ok".to_string()]
        }
    }

    #[test]
    fn test_missing_dictionary_is_explicit() {
        let set = DictionarySet::new();
        let err = check_spelling(&set, "anything", "ur", DEFAULT_SUGGESTION_LIMIT).unwrap_err();
        assert!(matches!(err, ScriptscanError::DictionaryUnavailable { ref language } if language == "ur"));
    }

    #[test]
    fn test_no_errors_is_distinct_from_unavailable() {
        let set = DictionarySet::new().with("en", WordListDictionary::from_words(["all", "good"]));
        let outcome = check_spelling(&set, "all good", "en", DEFAULT_SUGGESTION_LIMIT).unwrap();
        assert_eq!(outcome.words_checked, 2);
        assert_eq!(outcome.misspelled_count, 0);
        assert!(outcome.suggestions.is_empty());
    }

    #[test]
    fn test_misspellings_and_suggestions() {
        let set = DictionarySet::new().with("en", WordListDictionary::from_words(["hello", "world"]));
        let outcome = check_spelling(&set, "helo world wrld 42", "en", DEFAULT_SUGGESTION_LIMIT).unwrap();
        assert_eq!(outcome.words_checked, 3);
        assert_eq!(outcome.misspelled_words, vec!["helo", "wrld"]);
        assert_eq!(outcome.misspelled_count, 2);
        assert_eq!(outcome.suggestions.keys().collect::<Vec<_>>(), vec!["helo", "wrld"]);
        assert!(outcome.suggestions["helo"].contains(&"hello".to_string()));
        assert!(outcome.suggestions["wrld"].contains(&"world".to_string()));
    }

    #[test]
    fn test_suggestion_limit_bounds_work() {
        let dict = Arc::new(CountingDictionary {
            suggest_calls: AtomicUsize::new(0),
        });
        let mut set = DictionarySet::new();
        set.insert("en", dict.clone());

        let text: Vec<String> = (0..25).map(|i| format!("bad{}x", "q".repeat(i))).collect();
        let outcome = check_spelling(&set, &text.join(" "), "en", DEFAULT_SUGGESTION_LIMIT).unwrap();

        assert_eq!(outcome.misspelled_count, 25);
        assert_eq!(outcome.suggestions.len(), DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(dict.suggest_calls.load(Ordering::SeqCst), DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(outcome.suggestions.get_index(0).map(|(k, _)| k.as_str()), Some("badx"));
    }

    #[test]
    fn test_duplicates_are_suggested_once() {
        let dict = Arc::new(CountingDictionary {
            suggest_calls: AtomicUsize::new(0),
        });
        let mut set = DictionarySet::new();
        set.insert("en", dict.clone());

        let outcome = check_spelling(&set, "oops oops ok oops", "en", 2).unwrap();
        assert_eq!(outcome.misspelled_words, vec!["oops", "oops", "oops"]);
        assert_eq!(outcome.suggestions.len(), 1);
        assert_eq!(dict.suggest_calls.load(Ordering::SeqCst), 1);
    }
}
