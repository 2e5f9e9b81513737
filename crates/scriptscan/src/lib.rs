//! Scriptscan - adaptive multi-script OCR
//!
//! Scriptscan turns scanned pages of unknown, possibly mixed left-to-right and
//! right-to-left languages into text annotated with per-paragraph language
//! identity and a dictionary-backed confidence score.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use scriptscan::{ScriptscanConfig, extract_document, export};
//!
//! # async fn example() -> scriptscan::Result<()> {
//! let config = ScriptscanConfig::discover()?.unwrap_or_default();
//! let report = extract_document("scan.pdf", &config).await?;
//! println!("{}", export::to_plain_text(&report.analysis));
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Language** (`language`): supported-language table, statistical detection
//!   with explicit fallback, dictionary confidence scoring
//! - **Dictionaries** (`dictionary`): hunspell and word-list dictionaries,
//!   spellcheck with bounded suggestions
//! - **OCR** (`ocr`): the engine boundary, a tesseract adapter, and the
//!   two-pass adaptive controller
//! - **Analysis** (`analysis`): paragraph-level aggregation into document
//!   statistics
//! - **Text** (`text`): tokenization, Arabic shaping, bidi reordering
//! - **Core** (`core`): configuration and the page-parallel pipeline
//!
//! # Features
//!
//! - `hunspell` (default): load `.aff`/`.dic` dictionaries

#![deny(unsafe_code)]

pub mod analysis;
pub mod core;
pub mod dictionary;
pub mod error;
pub mod export;
pub mod language;
pub mod ocr;
pub mod raster;
pub mod text;
pub mod types;

pub use error::{Result, ScriptscanError};
pub use types::*;

pub use core::config::{LanguageConfig, OcrConfig, PipelineConfig, ScriptscanConfig};
pub use core::extractor::{extract_document, process_document};
pub use core::pipeline::process_pages;

pub use analysis::aggregate;
pub use dictionary::{Dictionary, DictionarySet, SpellCheckOutcome, WordListDictionary, check_spelling};
pub use export::OutputFormat;
pub use language::{Detection, Direction, LanguageContext, LanguageDetector, LanguageIdentifier, LanguageProfile};
pub use ocr::{AdaptiveOcrController, LanguageSet, OcrEngine, RetryPolicy, TesseractEngine};
pub use raster::{PageImage, Rasterizer};
pub use text::{VisualText, to_visual};
