//! Error types for scriptscan.
//!
//! Every fallible operation returns [`ScriptscanError`]. The taxonomy mirrors
//! how failures are handled in the OCR pipeline:
//!
//! - `Io` - file system errors, always bubble up unchanged
//! - `Ocr` - the OCR engine failed on one page and language set; surfaced per
//!   page, never aborts sibling pages
//! - `DictionaryUnavailable` - only surfaced from the direct spellcheck
//!   interface, everywhere else a missing dictionary degrades to a neutral
//!   confidence
//! - `EmptyDocument` - aggregation found no non-blank paragraph, so there is no
//!   dominant language to report
//!
//! Language detection failures are not errors at all: they are represented by
//! [`crate::language::Detection::Fallback`].
//!
//! # Example
//!
//! ```rust
//! use scriptscan::{Result, ScriptscanError};
//!
//! fn require_threshold(value: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&value) {
//!         return Err(ScriptscanError::validation(format!(
//!             "threshold must be within [0, 1], got {}",
//!             value
//!         )));
//!     }
//!     Ok(value)
//! }
//! ```
use thiserror::Error;

/// Result type alias using `ScriptscanError`.
pub type Result<T> = std::result::Result<T, ScriptscanError>;

/// Main error type for all scriptscan operations.
#[derive(Debug, Error)]
pub enum ScriptscanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Spellchecker not available for {language}")]
    DictionaryUnavailable { language: String },

    #[error("Document contains no text to analyze")]
    EmptyDocument,

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for ScriptscanError {
    fn from(err: serde_json::Error) -> Self {
        ScriptscanError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl ScriptscanError {
    error_constructor!(ocr, Ocr);
    error_constructor!(validation, Validation);
    error_constructor!(serialization, Serialization);

    /// Create a `DictionaryUnavailable` error for a language code.
    pub fn dictionary_unavailable<S: Into<String>>(language: S) -> Self {
        Self::DictionaryUnavailable {
            language: language.into(),
        }
    }

    /// Whether this error is local to one page and must not abort the document.
    pub fn is_page_local(&self) -> bool {
        matches!(self, Self::Ocr { .. } | Self::MissingDependency(_) | Self::Timeout(_))
    }
}
