//! Language identification.
//!
//! - [`profiles`]: the static supported-language table and direction resolver
//! - [`detector`]: statistical detection with explicit fallback
//! - [`confidence`]: dictionary-backed confidence scoring
//! - [`context`]: the immutable context handed to every pipeline run

pub mod confidence;
pub mod context;
pub mod detector;
pub mod profiles;

pub use confidence::{LexicalConfidenceScorer, NEUTRAL_CONFIDENCE};
pub use context::LanguageContext;
pub use detector::{Detection, FallbackReason, LanguageDetector, LanguageIdentifier, WhatlangIdentifier};
pub use profiles::{
    DEFAULT_LANGUAGE, Direction, LanguageProfile, SUPPORTED_LANGUAGES, ScriptInfo, Shaping, UNKNOWN_LANGUAGE,
    font_for, is_rtl, is_supported, profile, resolve, resolve_direction,
};
