//! Serializing document results.
//!
//! JSON and plain text carry the logical character sequence and round-trip
//! language metadata. The display export is the only one that passes page text
//! through the logical-to-visual transform.

use crate::text::{VisualText, to_visual_by_line};
use crate::types::{DocumentAnalysis, DocumentReport, PageAnalysis, ParagraphAnalysis};
use crate::{Result, ScriptscanError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
    /// Plain-text layout in visual order, for renderers without bidi support.
    Display,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text | OutputFormat::Display => "txt",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ScriptscanError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            "display" => Ok(OutputFormat::Display),
            other => Err(ScriptscanError::validation(format!(
                "Unknown output format '{}' (expected json, text or display)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
            OutputFormat::Display => "display",
        })
    }
}

/// Render a report in `format`.
pub fn render(report: &DocumentReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Text => Ok(to_plain_text(&report.analysis)),
        OutputFormat::Display => Ok(to_display_text(&report.analysis)),
    }
}

/// Pretty-printed JSON.
pub fn to_json(report: &DocumentReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn from_json(json: &str) -> Result<DocumentReport> {
    serde_json::from_str(json)
        .map_err(|e| ScriptscanError::serialization_with_source("Invalid document report JSON", e))
}

/// Page-by-page text in logical order.
pub fn to_plain_text(analysis: &DocumentAnalysis) -> String {
    let mut out = String::new();
    for page in &analysis.pages {
        write_page(&mut out, page, &page.text);
    }
    out
}

/// Page-by-page text in visual order.
pub fn to_display_text(analysis: &DocumentAnalysis) -> String {
    let mut out = String::new();
    for page in &analysis.pages {
        let visual = visual_page_text(page, &analysis.paragraphs);
        write_page(&mut out, page, visual.as_str());
    }
    out
}

/// Visual text for one page.
///
/// Each paragraph uses its own detected language from `paragraphs`; other
/// lines use the page language.
pub fn visual_page_text<'a>(page: &'a PageAnalysis, paragraphs: &'a [ParagraphAnalysis]) -> VisualText {
    let page_code = page.language.as_ref().map(|l| l.code.as_str()).unwrap_or_default();
    let mut page_paragraphs = paragraphs
        .iter()
        .filter(|p| p.page_number == page.page_number)
        .peekable();

    to_visual_by_line(&page.text, |line| {
        let line = line.strip_suffix('\r').unwrap_or(line);
        page_paragraphs
            .next_if(|p| p.text == line)
            .map(|p| p.language.code.as_str())
            .unwrap_or(page_code)
    })
}

fn write_page(out: &mut String, page: &PageAnalysis, text: &str) {
    out.push_str(&format!("=== Page {} ===\n", page.page_number));
    if let Some(language) = &page.language {
        out.push_str(&format!("Language: {}\n\n", language.name));
    }
    out.push_str(text);
    out.push_str("\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::profiles::profile;
    use crate::types::{DetectionResult, RecognitionPass};
    use indexmap::IndexMap;

    fn page(number: usize, text: &str, code: Option<&str>) -> PageAnalysis {
        PageAnalysis {
            page_number: number,
            text: text.to_string(),
            language: code.map(|c| DetectionResult::detected(profile(c).unwrap(), 0.9)),
            word_count: crate::text::token_count(text),
            pass: RecognitionPass::Narrow,
        }
    }

    fn analysis() -> DocumentAnalysis {
        DocumentAnalysis {
            pages: vec![page(1, "Hello world", Some("en")), page(2, "שלום", Some("he")), page(3, "", None)],
            dominant_language: "en".to_string(),
            language_distribution: IndexMap::from([("en".to_string(), 1), ("he".to_string(), 1)]),
            total_words: 3,
            paragraphs: Vec::new(),
        }
    }

    #[test]
    fn test_plain_text_layout() {
        let text = to_plain_text(&analysis());
        assert_eq!(
            text,
            "=== Page 1 ===\nLanguage: English\n\nHello world\n\n\
             === Page 2 ===\nLanguage: Hebrew\n\nשלום\n\n\
             === Page 3 ===\n\n\n"
        );
    }

    #[test]
    fn test_display_text_is_visual() {
        let text = to_display_text(&analysis());
        assert!(text.contains("םולש"));
        assert!(text.contains("Hello world"));
        assert!(!text.contains("שלום"));
    }

    #[test]
    fn test_display_text_uses_paragraph_languages() {
        let mixed = page(1, "Hello world\n\nباب", Some("en"));
        let paragraphs = vec![
            ParagraphAnalysis {
                page_number: 1,
                text: "Hello world".to_string(),
                language: DetectionResult::detected(profile("en").unwrap(), 1.0),
                word_count: 2,
            },
            ParagraphAnalysis {
                page_number: 1,
                text: "باب".to_string(),
                language: DetectionResult::detected(profile("ar").unwrap(), 0.5),
                word_count: 1,
            },
        ];

        let visual = visual_page_text(&mixed, &paragraphs);
        assert_eq!(visual.as_str(), "Hello world\n\n\u{FE8F}\u{FE8E}\u{FE91}");

        let page_level_only = visual_page_text(&mixed, &[]);
        assert_eq!(page_level_only.as_str(), "Hello world\n\nباب");
    }

    #[test]
    fn test_json_shape() {
        let report = DocumentReport {
            analysis: analysis(),
            failed_pages: Vec::new(),
        };
        let value: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
        assert_eq!(value["dominant_language"], "en");
        assert_eq!(value["pages"][0]["language"]["code"], "en");
        assert_eq!(value["pages"][1]["language"]["direction"], "rtl");
        assert!(value["pages"][2]["language"].is_null());
        assert_eq!(value["language_distribution"]["he"], 1);
        assert!(value.get("failed_pages").is_none());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("display".parse::<OutputFormat>().unwrap(), OutputFormat::Display);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}
