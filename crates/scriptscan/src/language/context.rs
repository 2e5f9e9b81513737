//! Immutable language context shared by every pipeline invocation.
//!
//! Holds the detector and the dictionaries. It is built once at startup and
//! handed to workers behind an `Arc`; nothing in it is mutated afterwards.

use super::confidence::LexicalConfidenceScorer;
use super::detector::{Detection, LanguageDetector, WhatlangIdentifier};
use super::profiles::{self, LanguageProfile};
use crate::Result;
use crate::core::config::LanguageConfig;
use crate::dictionary::{
    DEFAULT_SUGGESTION_LIMIT, DictionarySet, SpellCheckOutcome, WordListDictionary, check_spelling,
};
use crate::types::DetectionResult;
use std::sync::Arc;

#[derive(Debug)]
pub struct LanguageContext {
    detector: LanguageDetector,
    dictionaries: DictionarySet,
    languages: Vec<&'static LanguageProfile>,
    suggestion_limit: usize,
}

impl LanguageContext {
    /// Context over all supported languages.
    pub fn new(detector: LanguageDetector, dictionaries: DictionarySet) -> Self {
        Self {
            detector,
            dictionaries,
            languages: profiles::SUPPORTED_LANGUAGES.iter().collect(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    /// Build the context described by `config`, loading dictionaries from disk.
    pub fn from_config(config: &LanguageConfig) -> Result<Self> {
        config.validate()?;
        let languages = config.enabled_profiles();

        #[cfg(feature = "hunspell")]
        let dictionaries = DictionarySet::load_hunspell(&config.dictionary_dirs, languages.iter().copied());
        #[cfg(not(feature = "hunspell"))]
        let dictionaries = DictionarySet::new();

        let mut dictionaries = dictionaries;
        for (code, path) in &config.word_lists {
            let code = profiles::profile(code).map(|p| p.code).unwrap_or(code);
            let list = WordListDictionary::from_file(path)?;
            tracing::debug!(language = code, words = list.len(), "Loaded word list");
            dictionaries.insert(code, Arc::new(list));
        }

        tracing::info!(
            languages = ?languages.iter().map(|p| p.code).collect::<Vec<_>>(),
            dictionaries = ?dictionaries.languages(),
            "Language context ready"
        );

        let detector = LanguageDetector::new(WhatlangIdentifier::new(languages.iter().copied()));
        Ok(Self {
            detector,
            dictionaries,
            languages,
            suggestion_limit: config.suggestion_limit,
        })
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    pub fn detector(&self) -> &LanguageDetector {
        &self.detector
    }

    pub fn dictionaries(&self) -> &DictionarySet {
        &self.dictionaries
    }

    /// Languages enabled for this context, in broad-pass order.
    pub fn languages(&self) -> &[&'static LanguageProfile] {
        &self.languages
    }

    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }

    pub fn detect(&self, text: &str) -> Detection {
        self.detector.detect(text)
    }

    pub fn score(&self, text: &str, language: &str) -> f64 {
        LexicalConfidenceScorer::new(&self.dictionaries).score(text, language)
    }

    /// Detect the language of `text` and score it against the dictionary.
    pub fn analyze(&self, text: &str) -> DetectionResult {
        match self.detect(text) {
            Detection::Empty => DetectionResult::unknown(),
            Detection::Fallback { reason } => {
                tracing::debug!(%reason, "Using fallback language");
                DetectionResult::fallback()
            }
            Detection::Detected { profile } => DetectionResult::detected(profile, self.score(text, profile.code)),
        }
    }

    /// Spellcheck `text` in `language`, bounded by the suggestion limit.
    pub fn spell_check(&self, text: &str, language: &str) -> Result<SpellCheckOutcome> {
        let code = profiles::profile(language).map(|p| p.code).unwrap_or(language);
        check_spelling(&self.dictionaries, text, code, self.suggestion_limit)
    }
}
