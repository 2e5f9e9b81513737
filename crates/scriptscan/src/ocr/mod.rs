//! Optical character recognition.
//!
//! - [`engine`]: the [`OcrEngine`] boundary
//! - [`tesseract`]: the `tesseract` CLI adapter
//! - [`controller`]: the confidence-gated two-pass strategy

pub mod controller;
pub mod engine;
pub mod tesseract;
pub mod types;

pub use controller::{AdaptiveOcrController, OcrState, RetryPolicy};
pub use engine::OcrEngine;
pub use tesseract::TesseractEngine;
pub use types::LanguageSet;
