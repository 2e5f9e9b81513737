//! Document orchestration: configuration, I/O, and the page pipeline.

pub mod config;
pub mod extractor;
pub mod io;
pub mod pipeline;

pub use config::{LanguageConfig, OcrConfig, PipelineConfig, ScriptscanConfig};
pub use extractor::{extract_document, process_document};
pub use pipeline::process_pages;
