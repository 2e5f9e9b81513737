//! Tesseract OCR through the `tesseract` command-line tool.

use super::engine::OcrEngine;
use super::types::LanguageSet;
use crate::core::config::OcrConfig;
use crate::core::io::run_command;
use crate::raster::PageImage;
use crate::{Result, ScriptscanError};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tokio::time::Duration;

/// Default page segmentation mode: fully automatic, no OSD.
pub const DEFAULT_PSM: u8 = 3;

/// Default per-invocation timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct TesseractEngine {
    program: PathBuf,
    psm: u8,
    oem: Option<u8>,
    tessdata_dir: Option<PathBuf>,
    timeout: Duration,
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self {
            program: PathBuf::from("tesseract"),
            psm: DEFAULT_PSM,
            oem: None,
            tessdata_dir: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TesseractEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            program: config.tesseract_path.clone(),
            psm: config.psm,
            oem: config.oem,
            tessdata_dir: config.tessdata_dir.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    fn base_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        if let Some(dir) = &self.tessdata_dir {
            command.arg("--tessdata-dir").arg(dir);
        }
        command
    }

    /// Models installed in the tesseract data directory.
    pub async fn list_installed_languages(&self) -> Result<Vec<String>> {
        let mut command = self.base_command();
        command.arg("--list-langs");

        let output = run_command(command, &self.program_name(), self.timeout).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScriptscanError::ocr(format!(
                "tesseract --list-langs failed: {}",
                stderr.trim()
            )));
        }

        Ok(parse_language_list(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `tesseract --list-langs` output, skipping the header line.
fn parse_language_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    async fn recognize(&self, image: &PageImage, languages: &LanguageSet) -> Result<String> {
        // Deleted when the guard drops, whichever way this function returns.
        let page_file = tempfile::Builder::new()
            .prefix("scriptscan-page-")
            .suffix(&format!(".{}", image.extension()))
            .tempfile()?;
        tokio::fs::write(page_file.path(), image.bytes()).await?;

        let mut command = self.base_command();
        command
            .arg(page_file.path())
            .arg("stdout")
            .arg("-l")
            .arg(languages.to_tesseract_arg())
            .arg("--psm")
            .arg(self.psm.to_string());
        if let Some(oem) = self.oem {
            command.arg("--oem").arg(oem.to_string());
        }

        let output = run_command(command, &self.program_name(), self.timeout).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScriptscanError::ocr(format!(
                "tesseract failed for languages {} ({}): {}",
                languages,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| ScriptscanError::ocr_with_source("tesseract produced invalid UTF-8", e))
    }
}
