use crate::language::profiles::LanguageProfile;
use crate::{Result, ScriptscanError};
use serde::{Deserialize, Serialize};

/// Non-empty, ordered, duplicate-free set of OCR model identifiers.
///
/// The broad pass uses every enabled language's model; the narrow pass uses a
/// set of exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct LanguageSet {
    models: Vec<String>,
}

impl LanguageSet {
    /// # Errors
    ///
    /// Returns `ScriptscanError::Validation` if no non-blank model is given.
    pub fn new<I, S>(models: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for model in models {
            let model = model.into().trim().to_string();
            if !model.is_empty() && !unique.contains(&model) {
                unique.push(model);
            }
        }

        if unique.is_empty() {
            return Err(ScriptscanError::validation("OCR language set must not be empty"));
        }
        Ok(Self { models: unique })
    }

    pub fn single(model: impl Into<String>) -> Result<Self> {
        Self::new([model.into()])
    }

    /// OCR models for `profiles`, in order.
    pub fn for_profiles<'a>(profiles: impl IntoIterator<Item = &'a LanguageProfile>) -> Result<Self> {
        Self::new(profiles.into_iter().map(|p| p.ocr_language))
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// A `LanguageSet` is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Tesseract `-l` argument, e.g. `ara+heb+eng`.
    pub fn to_tesseract_arg(&self) -> String {
        self.models.join("+")
    }
}

impl TryFrom<Vec<String>> for LanguageSet {
    type Error = ScriptscanError;

    fn try_from(models: Vec<String>) -> Result<Self> {
        Self::new(models)
    }
}

impl From<LanguageSet> for Vec<String> {
    fn from(set: LanguageSet) -> Self {
        set.models
    }
}

impl std::fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_tesseract_arg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::profiles::SUPPORTED_LANGUAGES;

    #[test]
    fn test_rejects_empty() {
        assert!(LanguageSet::new(Vec::<String>::new()).is_err());
        assert!(LanguageSet::new(["", "  "]).is_err());
    }

    #[test]
    fn test_dedup_preserves_order() {
        let set = LanguageSet::new(["heb", "eng", "heb", "ara"]).unwrap();
        assert_eq!(set.models(), &["heb", "eng", "ara"]);
        assert_eq!(set.to_tesseract_arg(), "heb+eng+ara");
    }

    #[test]
    fn test_broad_set_from_profiles() {
        let set = LanguageSet::for_profiles(SUPPORTED_LANGUAGES).unwrap();
        assert_eq!(set.to_tesseract_arg(), "ara+heb+fas+urd+eng");
    }

    #[test]
    fn test_deserialize_validates() {
        let set: LanguageSet = serde_json::from_str(r#"["ara","eng"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert!(serde_json::from_str::<LanguageSet>("[]").is_err());
    }
}
