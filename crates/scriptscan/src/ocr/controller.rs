//! Confidence-gated two-pass OCR for a single page.
//!
//! ```text
//! Init -> BroadPass -> Evaluate -> NarrowPass -> Done
//!                          |                      ^
//!                          +----------------------+
//! ```
//!
//! The broad pass loads every enabled language's model at once. Evaluate
//! detects the language of the broad-pass text and scores it against that
//! language's dictionary. Only a score strictly above the retry threshold
//! earns a narrow pass with the single detected model; otherwise the broad
//! text is final. Blank broad-pass text goes straight to `Done` with no
//! language metadata.
//!
//! The detection attached to a page is the one computed in Evaluate, even when
//! the narrow pass replaced the text, unless
//! [`RetryPolicy::rescore_after_narrow_pass`] is set.

use super::engine::OcrEngine;
use super::types::LanguageSet;
use crate::language::LanguageContext;
use crate::language::profiles;
use crate::raster::PageImage;
use crate::text::token_count;
use crate::types::{DetectionResult, PageAnalysis, RecognitionPass};
use crate::{Result, ScriptscanError};
use std::sync::Arc;

/// Default confidence a broad-pass detection must exceed to earn a narrow pass.
pub const DEFAULT_RETRY_THRESHOLD: f64 = 0.5;

/// When to spend a second OCR invocation on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Narrow pass runs only when confidence is strictly greater than this.
    pub threshold: f64,
    /// Re-detect and re-score the narrow-pass text instead of keeping the
    /// broad-pass detection.
    pub rescore_after_narrow_pass: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_RETRY_THRESHOLD,
            rescore_after_narrow_pass: false,
        }
    }
}

impl RetryPolicy {
    pub fn new(threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ScriptscanError::validation(format!(
                "retry threshold must be within [0, 1], got {}",
                threshold
            )));
        }
        Ok(Self {
            threshold,
            ..Self::default()
        })
    }

    pub fn with_rescore(mut self, rescore: bool) -> Self {
        self.rescore_after_narrow_pass = rescore;
        self
    }

    pub fn should_narrow(&self, confidence: f64) -> bool {
        confidence > self.threshold
    }
}

/// States of one page's recognition.
#[derive(Debug, Clone, PartialEq)]
pub enum OcrState {
    Init,
    BroadPass,
    Evaluate {
        text: String,
    },
    NarrowPass {
        broad_text: String,
        detection: DetectionResult,
    },
    Done {
        text: String,
        detection: Option<DetectionResult>,
        pass: RecognitionPass,
    },
}

impl OcrState {
    pub fn name(&self) -> &'static str {
        match self {
            OcrState::Init => "init",
            OcrState::BroadPass => "broad_pass",
            OcrState::Evaluate { .. } => "evaluate",
            OcrState::NarrowPass { .. } => "narrow_pass",
            OcrState::Done { .. } => "done",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, OcrState::Done { .. })
    }
}

/// Runs the recognition state machine for pages, one independent run per page.
pub struct AdaptiveOcrController {
    engine: Arc<dyn OcrEngine>,
    context: Arc<LanguageContext>,
    broad_languages: LanguageSet,
    policy: RetryPolicy,
}

impl std::fmt::Debug for AdaptiveOcrController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptiveOcrController")
            .field("engine", &self.engine.name())
            .field("broad_languages", &self.broad_languages)
            .field("policy", &self.policy)
            .finish()
    }
}

impl AdaptiveOcrController {
    /// # Errors
    ///
    /// Returns `ScriptscanError::Validation` if the context enables no languages.
    pub fn new(engine: Arc<dyn OcrEngine>, context: Arc<LanguageContext>, policy: RetryPolicy) -> Result<Self> {
        let broad_languages = LanguageSet::for_profiles(context.languages().iter().copied())?;
        Ok(Self {
            engine,
            context,
            broad_languages,
            policy,
        })
    }

    pub fn context(&self) -> &Arc<LanguageContext> {
        &self.context
    }

    pub fn broad_languages(&self) -> &LanguageSet {
        &self.broad_languages
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Advance one state. `Done` is terminal and returned unchanged.
    pub async fn step(&self, state: OcrState, image: &PageImage) -> Result<OcrState> {
        let next = match state {
            OcrState::Init => OcrState::BroadPass,
            OcrState::BroadPass => {
                let text = self.engine.recognize(image, &self.broad_languages).await?;
                OcrState::Evaluate { text }
            }
            OcrState::Evaluate { text } => self.evaluate(text),
            OcrState::NarrowPass { broad_text, detection } => self.narrow_pass(broad_text, detection, image).await?,
            done @ OcrState::Done { .. } => done,
        };
        Ok(next)
    }

    fn evaluate(&self, text: String) -> OcrState {
        if text.trim().is_empty() {
            return OcrState::Done {
                text,
                detection: None,
                pass: RecognitionPass::Broad,
            };
        }

        let detection = self.context.analyze(&text);
        tracing::debug!(
            language = %detection.code,
            confidence = detection.confidence,
            threshold = self.policy.threshold,
            "Evaluated broad pass"
        );

        if self.policy.should_narrow(detection.confidence) && profiles::is_supported(&detection.code) {
            OcrState::NarrowPass {
                broad_text: text,
                detection,
            }
        } else {
            OcrState::Done {
                text,
                detection: Some(detection),
                pass: RecognitionPass::Broad,
            }
        }
    }

    async fn narrow_pass(&self, broad_text: String, detection: DetectionResult, image: &PageImage) -> Result<OcrState> {
        let languages = LanguageSet::single(profiles::ocr_language_for(&detection.code))?;
        let text = self.engine.recognize(image, &languages).await?;

        let detection = if self.policy.rescore_after_narrow_pass {
            let rescored = self.context.analyze(&text);
            tracing::debug!(
                before = %detection.code,
                after = %rescored.code,
                confidence = rescored.confidence,
                "Re-scored narrow pass"
            );
            rescored
        } else {
            detection
        };

        tracing::debug!(
            broad_chars = broad_text.chars().count(),
            narrow_chars = text.chars().count(),
            "Narrow pass replaced broad text"
        );

        Ok(OcrState::Done {
            text,
            detection: Some(detection),
            pass: RecognitionPass::Narrow,
        })
    }

    /// Recognize one page.
    ///
    /// # Errors
    ///
    /// Engine failures in either pass are returned as-is; the caller records
    /// them against this page only.
    #[tracing::instrument(skip(self, image), fields(engine = self.engine.name()))]
    pub async fn process_page(&self, page_number: usize, image: &PageImage) -> Result<PageAnalysis> {
        let mut state = OcrState::Init;
        loop {
            state = match state {
                OcrState::Done { text, detection, pass } => {
                    return Ok(PageAnalysis {
                        page_number,
                        word_count: token_count(&text),
                        text,
                        language: detection,
                        pass,
                    });
                }
                other => {
                    let from = other.name();
                    let next = self.step(other, image).await?;
                    tracing::debug!(from, to = next.name(), "OCR state transition");
                    next
                }
            };
        }
    }
}
