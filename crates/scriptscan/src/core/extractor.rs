//! Entry points for processing a document file end to end.

use super::config::{PipelineConfig, ScriptscanConfig};
use super::io::validate_file_exists;
use super::pipeline::process_pages;
use crate::Result;
use crate::language::LanguageContext;
use crate::ocr::{AdaptiveOcrController, OcrEngine, TesseractEngine};
use crate::raster::{Rasterizer, rasterizer_for};
use crate::types::DocumentReport;
use std::path::Path;
use std::sync::Arc;

/// Extract and analyze a PDF or image file.
///
/// Builds the language context, tesseract engine and rasterizer from `config`.
/// Callers processing many documents should build the context once and use
/// [`process_document`] instead.
///
/// # Example
///
/// ```rust,no_run
/// use scriptscan::core::config::ScriptscanConfig;
/// use scriptscan::extract_document;
///
/// # async fn example() -> scriptscan::Result<()> {
/// let report = extract_document("scan.pdf", &ScriptscanConfig::default()).await?;
/// println!("Dominant language: {}", report.analysis.dominant_language);
/// # Ok(())
/// # }
/// ```
pub async fn extract_document(path: impl AsRef<Path>, config: &ScriptscanConfig) -> Result<DocumentReport> {
    let path = path.as_ref();
    config.validate()?;
    validate_file_exists(path)?;

    let rasterizer = rasterizer_for(path, config.pipeline.rasterizer())?;
    let context = Arc::new(LanguageContext::from_config(&config.languages)?);
    let engine: Arc<dyn OcrEngine> = Arc::new(TesseractEngine::from_config(&config.ocr));
    let controller = Arc::new(AdaptiveOcrController::new(engine, context, config.ocr.retry_policy())?);

    process_document(path, rasterizer.as_ref(), controller, &config.pipeline).await
}

/// Rasterize `path` and run every page through `controller`.
pub async fn process_document(
    path: &Path,
    rasterizer: &dyn Rasterizer,
    controller: Arc<AdaptiveOcrController>,
    config: &PipelineConfig,
) -> Result<DocumentReport> {
    let pages = rasterizer.rasterize(path).await?;
    tracing::debug!(path = %path.display(), pages = pages.len(), "Rasterized document");
    process_pages(controller, pages, config).await
}
