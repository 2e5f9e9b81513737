//! Page-parallel document processing.
//!
//! Each page runs the adaptive OCR controller on its own task; a semaphore
//! bounds how many run at once. Aggregation waits for every page. A page-local
//! failure (see [`ScriptscanError::is_page_local`]) is recorded and left out
//! of the analysis; it never aborts its siblings. When every page fails, the
//! first page's error is returned. Other errors abort the run. A document
//! deadline drops the whole run, aborting in-flight page tasks, and yields no
//! partial output.

use crate::analysis::aggregate;
use crate::core::config::PipelineConfig;
use crate::ocr::AdaptiveOcrController;
use crate::raster::PageImage;
use crate::types::{DocumentReport, PageAnalysis, PageFailure};
use crate::{Result, ScriptscanError};
use ahash::AHashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Recognize every page and aggregate the results.
///
/// Pages are numbered from 1 in input order.
///
/// # Errors
///
/// - `Timeout` when the document deadline passes
/// - The first page's error when every page failed
/// - `EmptyDocument` when no successful page has any text
/// - Any error that is not page-local, such as `Io` (these always bubble up)
pub async fn process_pages(
    controller: Arc<AdaptiveOcrController>,
    pages: Vec<PageImage>,
    config: &PipelineConfig,
) -> Result<DocumentReport> {
    config.validate()?;

    match config.document_timeout() {
        Some(limit) => tokio::time::timeout(limit, run_pages(controller, pages, config.max_concurrent_pages))
            .await
            .map_err(|_| {
                tracing::warn!(timeout_secs = limit.as_secs(), "Document processing timed out");
                ScriptscanError::Timeout(format!("document not processed within {} seconds", limit.as_secs()))
            })?,
        None => run_pages(controller, pages, config.max_concurrent_pages).await,
    }
}

async fn run_pages(
    controller: Arc<AdaptiveOcrController>,
    pages: Vec<PageImage>,
    max_concurrent: usize,
) -> Result<DocumentReport> {
    let page_count = pages.len();
    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let mut tasks = JoinSet::new();
    let mut task_pages = AHashMap::with_capacity(page_count);

    for (index, image) in pages.into_iter().enumerate() {
        let page_number = index + 1;
        let controller = Arc::clone(&controller);
        let semaphore = Arc::clone(&semaphore);

        let handle = tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| ScriptscanError::ocr(format!("page scheduler closed: {}", e)))?;
            controller.process_page(page_number, &image).await
        });
        task_pages.insert(handle.id(), page_number);
    }

    let mut results: Vec<Option<PageAnalysis>> = vec![None; page_count];
    let mut failures: Vec<(usize, ScriptscanError)> = Vec::new();

    while let Some(joined) = tasks.join_next_with_id().await {
        let (page_number, outcome) = match joined {
            Ok((id, outcome)) => (task_pages.get(&id).copied(), outcome),
            Err(join_err) => (
                task_pages.get(&join_err.id()).copied(),
                Err(ScriptscanError::ocr(format!("page task panicked: {}", join_err))),
            ),
        };
        let Some(page_number) = page_number else {
            continue;
        };

        match outcome {
            Ok(analysis) => results[page_number - 1] = Some(analysis),
            Err(e) if e.is_page_local() => {
                tracing::warn!(page = page_number, error = %e, "Page failed, continuing with remaining pages");
                failures.push((page_number, e));
            }
            Err(e) => return Err(e),
        }
    }

    failures.sort_by_key(|(page_number, _)| *page_number);
    let pages: Vec<PageAnalysis> = results.into_iter().flatten().collect();

    if pages.is_empty() && !failures.is_empty() {
        let (page_number, first) = failures.swap_remove(0);
        tracing::warn!(page = page_number, failed = failures.len() + 1, "Every page failed");
        return Err(first);
    }

    let failed_pages: Vec<PageFailure> = failures
        .into_iter()
        .map(|(page_number, e)| PageFailure {
            page_number,
            error: e.to_string(),
        })
        .collect();
    let analysis = aggregate(controller.context(), pages)?;

    tracing::info!(
        pages = page_count,
        failed = failed_pages.len(),
        dominant = %analysis.dominant_language,
        "Document processed"
    );

    Ok(DocumentReport { analysis, failed_pages })
}
