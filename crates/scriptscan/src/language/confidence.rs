//! Dictionary-backed confidence scoring.
//!
//! Statistical detectors are unreliable on short, OCR-noisy text, so the
//! confidence attached to a detection is the fraction of tokens that the
//! detected language's dictionary recognizes, never the detector's own
//! probability.

use crate::dictionary::DictionarySet;
use crate::text::tokenize;

/// Confidence reported when no dictionary exists for a language.
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct LexicalConfidenceScorer<'a> {
    dictionaries: &'a DictionarySet,
}

impl<'a> LexicalConfidenceScorer<'a> {
    pub fn new(dictionaries: &'a DictionarySet) -> Self {
        Self { dictionaries }
    }

    /// Score how plausible it is that `text` is written in `language`.
    ///
    /// Returns [`NEUTRAL_CONFIDENCE`] without a dictionary, 0.0 when the text
    /// has no tokens, and the recognized-token fraction otherwise.
    pub fn score(&self, text: &str, language: &str) -> f64 {
        let Some(dictionary) = self.dictionaries.get(language) else {
            return NEUTRAL_CONFIDENCE;
        };

        let words = tokenize(text);
        if words.is_empty() {
            return 0.0;
        }

        let recognized = words.iter().filter(|word| dictionary.spell(word)).count();
        recognized as f64 / words.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordListDictionary;

    fn dictionaries() -> DictionarySet {
        DictionarySet::new()
            .with("en", WordListDictionary::from_words(["this", "is", "english", "text"]))
            .with("ar", WordListDictionary::from_words(["هذا", "نص", "عربي"]))
    }

    #[test]
    fn test_missing_dictionary_is_neutral() {
        let set = dictionaries();
        let scorer = LexicalConfidenceScorer::new(&set);
        assert_eq!(scorer.score("یہ اردو متن ہے", "ur"), NEUTRAL_CONFIDENCE);
    }

    #[test]
    fn test_zero_tokens_is_zero() {
        let set = dictionaries();
        let scorer = LexicalConfidenceScorer::new(&set);
        assert_eq!(scorer.score("", "en"), 0.0);
        assert_eq!(scorer.score("123 456 ___", "en"), 0.0);
    }

    #[test]
    fn test_fraction_recognized() {
        let set = dictionaries();
        let scorer = LexicalConfidenceScorer::new(&set);
        assert_eq!(scorer.score("This is English text", "en"), 1.0);
        assert_eq!(scorer.score("this is gibberish qwxz", "en"), 0.5);
        assert_eq!(scorer.score("هذا نص عربي", "ar"), 1.0);
        assert_eq!(scorer.score("هذا نص عربي", "en"), 0.0);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let set = dictionaries();
        let scorer = LexicalConfidenceScorer::new(&set);
        let text = "this is mostly english txet 2024";
        let first = scorer.score(text, "en");
        assert_eq!(scorer.score(text, "en"), first);
        assert_eq!(first, 0.6);
    }
}
