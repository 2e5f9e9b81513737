//! OCR engine boundary.

use super::types::LanguageSet;
use crate::Result;
use crate::raster::PageImage;
use async_trait::async_trait;

/// An optical character recognition capability.
///
/// The engine is stateless from the caller's point of view: each call gets
/// the page image and the models to load, and returns raw text. Engines must be
/// `Send + Sync`; one instance serves every page worker concurrently.
///
/// # Errors
///
/// - `ScriptscanError::Ocr` - the engine ran and failed on this page
/// - `ScriptscanError::MissingDependency` - the engine is not installed
/// - `ScriptscanError::Timeout` - a single invocation ran too long
/// - `ScriptscanError::Io` - I/O errors (these always bubble up)
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &str;

    async fn recognize(&self, image: &PageImage, languages: &LanguageSet) -> Result<String>;
}
