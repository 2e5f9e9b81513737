//! Document language aggregation tests.

use scriptscan::analysis::aggregate;
use scriptscan::dictionary::DictionarySet;
use scriptscan::language::{LanguageContext, LanguageDetector, LanguageIdentifier};
use scriptscan::{PageAnalysis, RecognitionPass, ScriptscanError};

/// Labels Arabic-script paragraphs `ar`, Hebrew `he`, everything else `en`.
struct ScriptIdentifier;

impl LanguageIdentifier for ScriptIdentifier {
    fn identify(&self, text: &str) -> Option<String> {
        let code = if text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c)) {
            "ar"
        } else if text.chars().any(|c| ('\u{0590}'..='\u{05FF}').contains(&c)) {
            "he"
        } else {
            "en"
        };
        Some(code.to_string())
    }
}

fn context() -> LanguageContext {
    LanguageContext::new(LanguageDetector::new(ScriptIdentifier), DictionarySet::new())
}

fn page(page_number: usize, text: &str) -> PageAnalysis {
    PageAnalysis {
        page_number,
        text: text.to_string(),
        language: None,
        word_count: scriptscan::text::token_count(text),
        pass: RecognitionPass::Broad,
    }
}

#[test]
fn test_mixed_document() {
    let pages = vec![page(1, "English text.\nهذا نص عربي\nMore English.")];

    let analysis = aggregate(&context(), pages).unwrap();

    assert_eq!(analysis.dominant_language, "en");
    assert_eq!(analysis.language_distribution.len(), 2);
    assert_eq!(analysis.language_distribution["en"], 2);
    assert_eq!(analysis.language_distribution["ar"], 1);
    assert_eq!(analysis.total_words, 2 + 3 + 2);
    assert_eq!(analysis.paragraphs.len(), 3);
    assert_eq!(analysis.paragraphs[1].language.code, "ar");
    assert_eq!(analysis.dominant_language_name(), "English");
}

#[test]
fn test_paragraphs_counted_across_pages() {
    let pages = vec![
        page(1, "שלום עולם\n\n   \nAnother line"),
        page(2, "עוד פסקה\nשורה אחרונה"),
    ];

    let analysis = aggregate(&context(), pages).unwrap();

    assert_eq!(analysis.dominant_language, "he");
    assert_eq!(
        analysis.language_distribution.iter().collect::<Vec<_>>(),
        vec![(&"he".to_string(), &3), (&"en".to_string(), &1)]
    );
    assert_eq!(analysis.paragraphs[3].page_number, 2);
    assert_eq!(analysis.pages.len(), 2);
}

#[test]
fn test_tie_goes_to_first_seen_language() {
    let pages = vec![page(1, "هذا نص\nEnglish here\nنص عربي\nMore English")];
    let analysis = aggregate(&context(), pages).unwrap();
    assert_eq!(analysis.dominant_language, "ar");
}

#[test]
fn test_no_pages_is_empty_document() {
    let err = aggregate(&context(), Vec::new()).unwrap_err();
    assert!(matches!(err, ScriptscanError::EmptyDocument));
}

#[test]
fn test_blank_pages_are_empty_document() {
    let pages = vec![page(1, "\n\n   \n"), page(2, ""), page(3, "\t")];
    let err = aggregate(&context(), pages).unwrap_err();
    assert!(matches!(err, ScriptscanError::EmptyDocument));
}

#[test]
fn test_digits_do_not_count_as_words() {
    let pages = vec![page(1, "Invoice 2024\n12345")];
    let analysis = aggregate(&context(), pages).unwrap();
    assert_eq!(analysis.total_words, 1);
    // the digits-only paragraph still counts as a paragraph
    assert_eq!(analysis.language_distribution["en"], 2);
}
