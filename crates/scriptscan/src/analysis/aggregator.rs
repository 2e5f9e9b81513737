//! Document-level language statistics.
//!
//! A single page may mix languages, so detection runs per paragraph
//! (newline-delimited, non-blank segment), not per page.

use crate::language::LanguageContext;
use crate::text::{paragraphs, token_count};
use crate::types::{DocumentAnalysis, PageAnalysis, ParagraphAnalysis};
use crate::{Result, ScriptscanError};
use indexmap::IndexMap;

/// Aggregate page analyses into document statistics.
///
/// # Errors
///
/// Returns `ScriptscanError::EmptyDocument` when no page contains a non-blank
/// paragraph.
pub fn aggregate(context: &LanguageContext, pages: Vec<PageAnalysis>) -> Result<DocumentAnalysis> {
    let mut paragraph_results = Vec::new();
    let mut distribution: IndexMap<String, usize> = IndexMap::new();
    let mut total_words = 0;

    for page in &pages {
        for paragraph in paragraphs(&page.text) {
            let language = context.analyze(paragraph);
            let word_count = token_count(paragraph);

            *distribution.entry(language.code.clone()).or_insert(0) += 1;
            total_words += word_count;
            paragraph_results.push(ParagraphAnalysis {
                page_number: page.page_number,
                text: paragraph.to_string(),
                language,
                word_count,
            });
        }
    }

    let dominant_language = dominant_language(&distribution)
        .ok_or(ScriptscanError::EmptyDocument)?
        .to_string();

    tracing::info!(
        pages = pages.len(),
        paragraphs = paragraph_results.len(),
        dominant = %dominant_language,
        total_words,
        "Aggregated document languages"
    );

    Ok(DocumentAnalysis {
        pages,
        dominant_language,
        language_distribution: distribution,
        total_words,
        paragraphs: paragraph_results,
    })
}

/// Language with the highest count; ties go to the one inserted first.
pub fn dominant_language(distribution: &IndexMap<String, usize>) -> Option<&str> {
    let mut best: Option<(&str, usize)> = None;
    for (code, &count) in distribution {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((code.as_str(), count));
        }
    }
    best.map(|(code, _)| code)
}
