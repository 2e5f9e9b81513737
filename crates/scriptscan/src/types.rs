use crate::language::profiles::{DEFAULT_LANGUAGE, Direction, LanguageProfile, UNKNOWN_LANGUAGE};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a [`DetectionResult`] came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionOrigin {
    /// The statistical model identified a supported language.
    #[default]
    Detected,
    /// Detection failed or was unsupported; default language substituted.
    Fallback,
    /// The text unit was blank.
    Empty,
}

/// Language identity of one text unit (paragraph or page).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub code: String,
    /// Dictionary recognition rate in [0.0, 1.0].
    pub confidence: f64,
    pub direction: Direction,
    pub name: String,
    #[serde(default)]
    pub origin: DetectionOrigin,
}

impl DetectionResult {
    pub fn detected(profile: &LanguageProfile, confidence: f64) -> Self {
        Self {
            code: profile.code.to_string(),
            confidence: confidence.clamp(0.0, 1.0),
            direction: profile.direction,
            name: profile.name.to_string(),
            origin: DetectionOrigin::Detected,
        }
    }

    /// Default-language result with fixed moderate confidence.
    pub fn fallback() -> Self {
        Self {
            code: DEFAULT_LANGUAGE.to_string(),
            confidence: 0.5,
            direction: Direction::Ltr,
            name: "English (fallback)".to_string(),
            origin: DetectionOrigin::Fallback,
        }
    }

    /// Neutral result for blank text.
    pub fn unknown() -> Self {
        Self {
            code: UNKNOWN_LANGUAGE.to_string(),
            confidence: 0.0,
            direction: Direction::Ltr,
            name: "Unknown".to_string(),
            origin: DetectionOrigin::Empty,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == DetectionOrigin::Fallback
    }
}

/// Which OCR pass produced a page's final text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionPass {
    /// Multi-language pass only.
    #[default]
    Broad,
    /// Single-language re-pass after a confident detection.
    Narrow,
}

/// Result of running one rasterized page through the adaptive OCR controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAnalysis {
    pub page_number: usize,
    /// Logical (reading-order) text.
    pub text: String,
    /// `None` when OCR produced no text.
    pub language: Option<DetectionResult>,
    pub word_count: usize,
    #[serde(default)]
    pub pass: RecognitionPass,
}

/// Language identity of one paragraph within a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphAnalysis {
    pub page_number: usize,
    pub text: String,
    pub language: DetectionResult,
    pub word_count: usize,
}

/// Document-level language statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub pages: Vec<PageAnalysis>,
    /// Code of the language with the most paragraphs; ties go to the first seen.
    pub dominant_language: String,
    /// Paragraph count per language code, in first-seen order.
    pub language_distribution: IndexMap<String, usize>,
    pub total_words: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paragraphs: Vec<ParagraphAnalysis>,
}

impl DocumentAnalysis {
    /// Display name of the dominant language.
    pub fn dominant_language_name(&self) -> &str {
        self.paragraphs
            .iter()
            .find(|p| p.language.code == self.dominant_language)
            .map(|p| p.language.name.as_str())
            .or_else(|| crate::language::profiles::profile(&self.dominant_language).map(|p| p.name))
            .unwrap_or("Unknown")
    }
}

/// A page the pipeline could not process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFailure {
    pub page_number: usize,
    pub error: String,
}

/// Output of processing a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    #[serde(flatten)]
    pub analysis: DocumentAnalysis,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_pages: Vec<PageFailure>,
}
