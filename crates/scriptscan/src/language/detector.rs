//! Statistical language detection with explicit fallback.
//!
//! Detection never fails: blank input short-circuits to [`Detection::Empty`]
//! without touching the statistical model, and anything the model cannot place
//! in the supported set becomes [`Detection::Fallback`].

use super::profiles::{self, DEFAULT_LANGUAGE, LanguageProfile, SUPPORTED_LANGUAGES, UNKNOWN_LANGUAGE};
use whatlang::{Detector, Lang};

/// A statistical language identifier.
///
/// Implementations must be deterministic: identical input, identical output.
pub trait LanguageIdentifier: Send + Sync {
    /// Best-guess language code for non-blank `text`, or `None` when the model
    /// cannot decide.
    fn identify(&self, text: &str) -> Option<String>;
}

/// `whatlang` trigram detector restricted to the supported languages.
pub struct WhatlangIdentifier {
    detector: Detector,
}

impl WhatlangIdentifier {
    pub fn new<'a>(profiles: impl IntoIterator<Item = &'a LanguageProfile>) -> Self {
        let allowlist: Vec<Lang> = profiles.into_iter().map(LanguageProfile::whatlang_lang).collect();
        Self {
            detector: Detector::with_allowlist(allowlist),
        }
    }
}

impl Default for WhatlangIdentifier {
    fn default() -> Self {
        Self::new(SUPPORTED_LANGUAGES)
    }
}

impl LanguageIdentifier for WhatlangIdentifier {
    fn identify(&self, text: &str) -> Option<String> {
        let info = self.detector.detect(text)?;
        match profiles::profile_for_whatlang(info.lang()) {
            Some(profile) => Some(profile.code.to_string()),
            None => Some(info.lang().code().to_string()),
        }
    }
}

/// Why detection fell back to the default language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The model produced no answer (too short, garbled, unknown script).
    Undetermined,
    /// The model answered with a language outside the supported table.
    Unsupported(String),
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::Undetermined => f.write_str("language could not be determined"),
            FallbackReason::Unsupported(code) => write!(f, "detected unsupported language '{}'", code),
        }
    }
}

/// Outcome of detecting one text unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Blank input; nothing was detected.
    Empty,
    /// The model identified a supported language.
    Detected { profile: &'static LanguageProfile },
    /// The model could not be trusted; the default language applies.
    Fallback { reason: FallbackReason },
}

impl Detection {
    /// Language code this detection resolves to.
    pub fn code(&self) -> &'static str {
        match self {
            Detection::Empty => UNKNOWN_LANGUAGE,
            Detection::Detected { profile } => profile.code,
            Detection::Fallback { .. } => DEFAULT_LANGUAGE,
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self, Detection::Detected { .. })
    }
}

/// Language detector over a pluggable statistical backend.
pub struct LanguageDetector {
    identifier: Box<dyn LanguageIdentifier>,
}

impl std::fmt::Debug for LanguageDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageDetector").finish_non_exhaustive()
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(WhatlangIdentifier::default())
    }
}

impl LanguageDetector {
    pub fn new(identifier: impl LanguageIdentifier + 'static) -> Self {
        Self {
            identifier: Box::new(identifier),
        }
    }

    /// Detect the language of `text`.
    pub fn detect(&self, text: &str) -> Detection {
        if text.trim().is_empty() {
            return Detection::Empty;
        }

        match self.identifier.identify(text) {
            Some(code) => match profiles::profile(&code) {
                Some(profile) => Detection::Detected { profile },
                None => {
                    tracing::debug!(code = %code, "Detected language is not supported, using default");
                    Detection::Fallback {
                        reason: FallbackReason::Unsupported(code),
                    }
                }
            },
            None => {
                tracing::debug!(chars = text.chars().count(), "Language detection undetermined, using default");
                Detection::Fallback {
                    reason: FallbackReason::Undetermined,
                }
            }
        }
    }
}
