//! Static table of supported languages and the script direction resolver.
//!
//! The table is immutable and lives for the whole process. Every other module
//! resolves language codes through here, which is what keeps detection results
//! inside the supported set.

use serde::{Deserialize, Serialize};
use whatlang::Lang;

/// Code reported when a text unit contains nothing to detect.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Code substituted when statistical detection cannot decide.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Writing direction of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Direction::Rtl)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contextual letter-joining applied before bidi reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shaping {
    /// Characters are rendered as-is.
    #[default]
    None,
    /// Arabic-letter joining into presentation forms (Arabic, Persian, Urdu).
    Arabic,
}

/// Everything the resolver knows about how a language is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptInfo {
    pub direction: Direction,
    pub shaping: Shaping,
}

impl Default for ScriptInfo {
    fn default() -> Self {
        Self {
            direction: Direction::Ltr,
            shaping: Shaping::None,
        }
    }
}

/// Static description of one supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile {
    /// ISO 639-1 code used throughout results and exports.
    pub code: &'static str,
    pub name: &'static str,
    pub direction: Direction,
    pub shaping: Shaping,
    /// Tesseract traineddata identifier.
    pub ocr_language: &'static str,
    /// Hunspell dictionary file stem.
    pub dictionary: &'static str,
    /// Alternative codes and locales accepted on lookup.
    pub variants: &'static [&'static str],
    /// Font family a renderer should pick for this script.
    pub font: &'static str,
    pub(crate) whatlang: Lang,
}

impl LanguageProfile {
    pub fn script(&self) -> ScriptInfo {
        ScriptInfo {
            direction: self.direction,
            shaping: self.shaping,
        }
    }

    pub fn whatlang_lang(&self) -> Lang {
        self.whatlang
    }

    fn matches(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code) || self.variants.iter().any(|v| v.eq_ignore_ascii_case(code))
    }
}

/// All supported languages, in the order used for the broad OCR pass.
pub static SUPPORTED_LANGUAGES: &[LanguageProfile] = &[
    LanguageProfile {
        code: "ar",
        name: "Arabic",
        direction: Direction::Rtl,
        shaping: Shaping::Arabic,
        ocr_language: "ara",
        dictionary: "ar",
        variants: &["ara", "ar-EG", "ar-SA", "ar-IQ", "ar-SY"],
        font: "Amiri",
        whatlang: Lang::Ara,
    },
    LanguageProfile {
        code: "he",
        name: "Hebrew",
        direction: Direction::Rtl,
        shaping: Shaping::None,
        ocr_language: "heb",
        dictionary: "he",
        variants: &["heb", "he-IL"],
        font: "Amiri",
        whatlang: Lang::Heb,
    },
    LanguageProfile {
        code: "fa",
        name: "Persian/Farsi",
        direction: Direction::Rtl,
        shaping: Shaping::Arabic,
        ocr_language: "fas",
        dictionary: "fa",
        variants: &["fas", "fa-IR"],
        font: "Amiri",
        whatlang: Lang::Pes,
    },
    LanguageProfile {
        code: "ur",
        name: "Urdu",
        direction: Direction::Rtl,
        shaping: Shaping::Arabic,
        ocr_language: "urd",
        dictionary: "ur",
        variants: &["urd", "ur-PK"],
        font: "Amiri",
        whatlang: Lang::Urd,
    },
    LanguageProfile {
        code: "en",
        name: "English",
        direction: Direction::Ltr,
        shaping: Shaping::None,
        ocr_language: "eng",
        dictionary: "en_US",
        variants: &["eng", "en-US", "en-GB"],
        font: "DejaVu",
        whatlang: Lang::Eng,
    },
];

/// Look up a profile by code or any accepted variant (case-insensitive).
pub fn profile(code: &str) -> Option<&'static LanguageProfile> {
    SUPPORTED_LANGUAGES.iter().find(|p| p.matches(code))
}

/// Look up the profile whose statistical-detector language is `lang`.
pub fn profile_for_whatlang(lang: Lang) -> Option<&'static LanguageProfile> {
    SUPPORTED_LANGUAGES.iter().find(|p| p.whatlang == lang)
}

pub fn is_supported(code: &str) -> bool {
    profile(code).is_some()
}

/// Resolve writing direction and shaping for a language code.
///
/// Unsupported codes (including `unknown`) resolve to left-to-right without
/// shaping.
pub fn resolve(code: &str) -> ScriptInfo {
    profile(code).map(LanguageProfile::script).unwrap_or_default()
}

pub fn resolve_direction(code: &str) -> Direction {
    resolve(code).direction
}

pub fn is_rtl(code: &str) -> bool {
    resolve_direction(code).is_rtl()
}

/// Font hint for renderers; RTL scripts share one font family.
pub fn font_for(code: &str) -> &'static str {
    profile(code).map(|p| p.font).unwrap_or("DejaVu")
}

/// Tesseract model for a detected language, defaulting to English.
pub fn ocr_language_for(code: &str) -> &'static str {
    profile(code).map(|p| p.ocr_language).unwrap_or("eng")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_consistent_with_profile() {
        for p in SUPPORTED_LANGUAGES {
            assert_eq!(resolve_direction(p.code), p.direction, "code {}", p.code);
            for variant in p.variants {
                assert_eq!(resolve_direction(variant), p.direction, "variant {}", variant);
            }
        }
    }

    #[test]
    fn test_unsupported_defaults_to_ltr() {
        assert_eq!(resolve_direction("fr"), Direction::Ltr);
        assert_eq!(resolve_direction(UNKNOWN_LANGUAGE), Direction::Ltr);
        assert_eq!(resolve_direction(""), Direction::Ltr);
        assert_eq!(resolve("zz").shaping, Shaping::None);
    }

    #[test]
    fn test_variant_lookup_is_case_insensitive() {
        assert_eq!(profile("AR-eg").map(|p| p.code), Some("ar"));
        assert_eq!(profile("fas").map(|p| p.code), Some("fa"));
        assert_eq!(profile("en-GB").map(|p| p.code), Some("en"));
        assert!(profile("de").is_none());
    }

    #[test]
    fn test_shaping_rules() {
        assert_eq!(resolve("ar").shaping, Shaping::Arabic);
        assert_eq!(resolve("fa").shaping, Shaping::Arabic);
        assert_eq!(resolve("ur").shaping, Shaping::Arabic);
        assert_eq!(resolve("he").shaping, Shaping::None);
        assert!(is_rtl("he"));
        assert!(!is_rtl("en"));
    }

    #[test]
    fn test_ocr_language_mapping() {
        assert_eq!(ocr_language_for("ar"), "ara");
        assert_eq!(ocr_language_for("ur"), "urd");
        assert_eq!(ocr_language_for("xx"), "eng");
    }

    #[test]
    fn test_fonts() {
        assert_eq!(font_for("fa"), "Amiri");
        assert_eq!(font_for("en"), "DejaVu");
        assert_eq!(font_for("unknown"), "DejaVu");
    }

    #[test]
    fn test_whatlang_mapping_is_unique() {
        for p in SUPPORTED_LANGUAGES {
            assert_eq!(profile_for_whatlang(p.whatlang).map(|q| q.code), Some(p.code));
        }
    }
}
