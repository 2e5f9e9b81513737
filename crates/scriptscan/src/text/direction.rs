//! Logical-to-visual conversion for direction-aware rendering.
//!
//! Right-to-left text is reshaped (Arabic-family scripts) and then reordered
//! with the Unicode Bidirectional Algorithm, one line at a time. The result is
//! a [`VisualText`], which only the display export accepts: JSON and plain-text
//! exports keep the logical character sequence.

use super::shaping::reshape;
use crate::language::profiles::{self, Shaping};
use std::borrow::Cow;
use unicode_bidi::BidiInfo;

/// Text in visual (display) order.
///
/// Not valid input for [`to_visual`]; the transform is one-way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualText(String);

impl VisualText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for VisualText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convert logical `text` in `language` to visual order.
///
/// Left-to-right and unsupported languages pass through unchanged.
pub fn to_visual(text: &str, language: &str) -> VisualText {
    let script = profiles::resolve(language);
    if !script.direction.is_rtl() {
        return VisualText(text.to_string());
    }

    let shaped: Cow<'_, str> = match script.shaping {
        Shaping::Arabic => Cow::Owned(reshape(text)),
        Shaping::None => Cow::Borrowed(text),
    };

    let lines: Vec<String> = shaped.split('\n').map(reorder_line).collect();
    VisualText(lines.join("\n"))
}

/// Convert logical `text` line by line, taking each line's language from
/// `language_of`.
///
/// Pages that mix scripts use this so every paragraph is shaped and ordered by
/// its own language.
pub fn to_visual_by_line<'a>(text: &str, mut language_of: impl FnMut(&str) -> &'a str) -> VisualText {
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| to_visual(line, language_of(line)).into_string())
        .collect();
    VisualText(lines.join("\n"))
}

fn reorder_line(line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }

    let info = BidiInfo::new(line, None);
    info.paragraphs
        .iter()
        .map(|para| info.reorder_line(para, para.range.clone()))
        .collect()
}
