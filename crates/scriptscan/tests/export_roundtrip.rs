//! Export format tests over full document reports.

use scriptscan::export::{self, OutputFormat};
use scriptscan::language::profile;
use scriptscan::{
    DetectionResult, DocumentAnalysis, DocumentReport, PageAnalysis, PageFailure, RecognitionPass,
};
use indexmap::IndexMap;

fn report() -> DocumentReport {
    let hebrew = DetectionResult::detected(profile("he").unwrap(), 0.5);
    let english = DetectionResult::detected(profile("en").unwrap(), 1.0);

    let pages = vec![
        PageAnalysis {
            page_number: 1,
            text: "שלום 123".to_string(),
            language: Some(hebrew),
            word_count: 1,
            pass: RecognitionPass::Narrow,
        },
        PageAnalysis {
            page_number: 2,
            text: "hello world".to_string(),
            language: Some(english),
            word_count: 2,
            pass: RecognitionPass::Broad,
        },
        PageAnalysis {
            page_number: 4,
            text: String::new(),
            language: None,
            word_count: 0,
            pass: RecognitionPass::Broad,
        },
    ];

    let mut distribution = IndexMap::new();
    distribution.insert("he".to_string(), 1);
    distribution.insert("en".to_string(), 1);

    DocumentReport {
        analysis: DocumentAnalysis {
            pages,
            dominant_language: "he".to_string(),
            language_distribution: distribution,
            total_words: 3,
            paragraphs: Vec::new(),
        },
        failed_pages: vec![PageFailure {
            page_number: 3,
            error: "OCR error: engine crashed".to_string(),
        }],
    }
}

#[test]
fn test_json_preserves_report() {
    let report = report();
    let json = export::to_json(&report).unwrap();
    let parsed = export::from_json(&json).unwrap();
    assert_eq!(parsed, report);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["dominant_language"], "he");
    assert_eq!(value["pages"][0]["text"], "שלום 123");
    assert_eq!(value["pages"][0]["language"]["direction"], "rtl");
    assert_eq!(value["pages"][2]["language"], serde_json::Value::Null);
    assert_eq!(value["failed_pages"][0]["page_number"], 3);
}

#[test]
fn test_distribution_keeps_first_seen_order() {
    let json = export::to_json(&report()).unwrap();
    let he = json.find("\"he\": 1").unwrap();
    let en = json.find("\"en\": 1").unwrap();
    assert!(he < en);
}

#[test]
fn test_plain_text_is_logical() {
    let text = export::render(&report(), OutputFormat::Text).unwrap();
    assert_eq!(
        text,
        "=== Page 1 ===\nLanguage: Hebrew\n\nשלום 123\n\n\
         === Page 2 ===\nLanguage: English\n\nhello world\n\n\
         === Page 4 ===\n\n\n"
    );
}

#[test]
fn test_display_text_is_visual() {
    let text = export::render(&report(), OutputFormat::Display).unwrap();
    assert!(text.contains("123 םולש"));
    assert!(text.contains("hello world"));
    assert!(!text.contains("שלום"));
}

#[test]
fn test_from_json_rejects_garbage() {
    assert!(export::from_json("{\"pages\": 3}").is_err());
}

#[test]
fn test_format_parsing() {
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!(OutputFormat::Display.extension(), "txt");
    assert!("pdf".parse::<OutputFormat>().is_err());
}
