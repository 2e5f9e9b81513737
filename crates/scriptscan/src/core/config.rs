//! Configuration loading and management.
//!
//! Configuration can be loaded from TOML, YAML, or JSON files, discovered by
//! walking up from the current directory, or built programmatically. Every
//! field has a default, so an empty file is a valid configuration.

use crate::dictionary::{DEFAULT_SUGGESTION_LIMIT, default_dictionary_dirs};
use crate::language::profiles::{self, LanguageProfile, SUPPORTED_LANGUAGES};
use crate::ocr::RetryPolicy;
use crate::ocr::controller::DEFAULT_RETRY_THRESHOLD;
use crate::ocr::tesseract::{DEFAULT_PSM, DEFAULT_TIMEOUT_SECS};
use crate::raster::{DEFAULT_DPI, PdftoppmRasterizer};
use crate::{Result, ScriptscanError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked for by [`ScriptscanConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "scriptscan.toml";

/// Main configuration.
///
/// # Example
///
/// ```rust
/// use scriptscan::core::config::ScriptscanConfig;
///
/// let config = ScriptscanConfig::default();
/// assert_eq!(config.ocr.narrow_pass_threshold, 0.5);
///
/// // Load from TOML file
/// // let config = ScriptscanConfig::from_toml_file("scriptscan.toml")?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptscanConfig {
    #[serde(default)]
    pub languages: LanguageConfig,

    #[serde(default)]
    pub ocr: OcrConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Languages, dictionaries and spellcheck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Supported language codes to recognize (default: all)
    #[serde(default = "default_enabled")]
    pub enabled: Vec<String>,

    /// Directories searched for hunspell `.aff`/`.dic` pairs
    #[serde(default = "default_dictionary_dirs")]
    pub dictionary_dirs: Vec<PathBuf>,

    /// Plain word lists, keyed by language code; override hunspell dictionaries
    #[serde(default)]
    pub word_lists: IndexMap<String, PathBuf>,

    /// Distinct misspelled tokens that receive suggestions
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

/// Tesseract invocation and the adaptive retry decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrConfig {
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: PathBuf,

    /// Page segmentation mode (0-13)
    #[serde(default = "default_psm")]
    pub psm: u8,

    /// OCR engine mode (0-3); tesseract's default when unset
    #[serde(default)]
    pub oem: Option<u8>,

    #[serde(default)]
    pub tessdata_dir: Option<PathBuf>,

    /// Per-invocation timeout
    #[serde(default = "default_ocr_timeout")]
    pub timeout_secs: u64,

    /// Confidence the broad pass must strictly exceed to trigger a narrow pass
    #[serde(default = "default_threshold")]
    pub narrow_pass_threshold: f64,

    /// Recompute page language metadata from the narrow-pass text
    #[serde(default)]
    pub rescore_after_narrow_pass: bool,
}

/// Rasterization and page scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pages recognized concurrently (default: number of CPUs)
    #[serde(default = "default_concurrency")]
    pub max_concurrent_pages: usize,

    /// Whole-document deadline; no deadline when unset
    #[serde(default)]
    pub document_timeout_secs: Option<u64>,

    #[serde(default = "default_dpi")]
    pub dpi: u32,

    #[serde(default = "default_pdftoppm_path")]
    pub pdftoppm_path: PathBuf,
}

fn default_enabled() -> Vec<String> {
    SUPPORTED_LANGUAGES.iter().map(|p| p.code.to_string()).collect()
}

fn default_suggestion_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

fn default_tesseract_path() -> PathBuf {
    PathBuf::from("tesseract")
}

fn default_psm() -> u8 {
    DEFAULT_PSM
}

fn default_ocr_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_threshold() -> f64 {
    DEFAULT_RETRY_THRESHOLD
}

fn default_concurrency() -> usize {
    num_cpus::get()
}

fn default_dpi() -> u32 {
    DEFAULT_DPI
}

fn default_pdftoppm_path() -> PathBuf {
    PathBuf::from("pdftoppm")
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            dictionary_dirs: default_dictionary_dirs(),
            word_lists: IndexMap::new(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: default_tesseract_path(),
            psm: default_psm(),
            oem: None,
            tessdata_dir: None,
            timeout_secs: default_ocr_timeout(),
            narrow_pass_threshold: default_threshold(),
            rescore_after_narrow_pass: false,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_pages: default_concurrency(),
            document_timeout_secs: None,
            dpi: default_dpi(),
            pdftoppm_path: default_pdftoppm_path(),
        }
    }
}

impl LanguageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.enabled.is_empty() {
            return Err(ScriptscanError::validation("at least one language must be enabled"));
        }
        for code in self.enabled.iter().chain(self.word_lists.keys()) {
            if !profiles::is_supported(code) {
                return Err(ScriptscanError::validation(format!(
                    "unsupported language '{}'; expected one of {}",
                    code,
                    SUPPORTED_LANGUAGES.iter().map(|p| p.code).collect::<Vec<_>>().join(", ")
                )));
            }
        }
        if self.suggestion_limit == 0 {
            return Err(ScriptscanError::validation("suggestion_limit must be at least 1"));
        }
        Ok(())
    }

    /// Enabled profiles in table order, each once.
    pub fn enabled_profiles(&self) -> Vec<&'static LanguageProfile> {
        SUPPORTED_LANGUAGES
            .iter()
            .filter(|p| self.enabled.iter().any(|code| profiles::profile(code) == Some(*p)))
            .collect()
    }
}

impl OcrConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.narrow_pass_threshold) {
            return Err(ScriptscanError::validation(format!(
                "narrow_pass_threshold must be within [0, 1], got {}",
                self.narrow_pass_threshold
            )));
        }
        if self.psm > 13 {
            return Err(ScriptscanError::validation(format!(
                "psm must be between 0 and 13, got {}",
                self.psm
            )));
        }
        if let Some(oem) = self.oem
            && oem > 3
        {
            return Err(ScriptscanError::validation(format!(
                "oem must be between 0 and 3, got {}",
                oem
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ScriptscanError::validation("OCR timeout_secs must be positive"));
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            threshold: self.narrow_pass_threshold,
            rescore_after_narrow_pass: self.rescore_after_narrow_pass,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_pages == 0 {
            return Err(ScriptscanError::validation("max_concurrent_pages must be at least 1"));
        }
        if self.dpi == 0 {
            return Err(ScriptscanError::validation("dpi must be positive"));
        }
        if self.document_timeout_secs == Some(0) {
            return Err(ScriptscanError::validation("document_timeout_secs must be positive"));
        }
        Ok(())
    }

    pub fn document_timeout(&self) -> Option<Duration> {
        self.document_timeout_secs.map(Duration::from_secs)
    }

    pub fn rasterizer(&self) -> PdftoppmRasterizer {
        let timeout = self.document_timeout().unwrap_or(Duration::from_secs(300));
        PdftoppmRasterizer::new(self.pdftoppm_path.clone(), self.dpi, timeout)
    }
}

impl ScriptscanConfig {
    pub fn validate(&self) -> Result<()> {
        self.languages.validate()?;
        self.ocr.validate()?;
        self.pipeline.validate()
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        toml::from_str(&content)
            .map_err(|e| ScriptscanError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| ScriptscanError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_json::from_str(&content)
            .map_err(|e| ScriptscanError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, choosing the format by file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Self::from_toml_file(path),
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(ScriptscanError::validation(format!(
                "Unsupported config format for {} (expected .toml, .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    /// Discover `scriptscan.toml` in the current or any parent directory.
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(ScriptscanError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered configuration");
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| ScriptscanError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}
