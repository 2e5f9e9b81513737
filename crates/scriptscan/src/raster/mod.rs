//! Turning documents into page images.
//!
//! PDFs are rendered with poppler's `pdftoppm`; single image files are passed
//! through as a one-page document. Rendering happens in a temporary directory
//! that is removed when rasterization returns, on success or failure.

use crate::core::io::{read_file_async, run_command};
use crate::{Result, ScriptscanError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;
use tokio::time::Duration;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Default rendering resolution.
pub const DEFAULT_DPI: u32 = 300;

/// One rasterized page, as encoded image bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    bytes: Vec<u8>,
}

impl PageImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Sniffed MIME type, if the bytes are a recognizable format.
    pub fn mime_type(&self) -> Option<&'static str> {
        infer::get(&self.bytes).map(|kind| kind.mime_type())
    }

    /// File extension matching the sniffed format, defaulting to `png`.
    pub fn extension(&self) -> &'static str {
        infer::get(&self.bytes).map(|kind| kind.extension()).unwrap_or("png")
    }
}

impl From<Vec<u8>> for PageImage {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// Converts a document into page images, one per page, in page order.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, path: &Path) -> Result<Vec<PageImage>>;
}

/// Renders PDF pages through the `pdftoppm` binary.
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    program: PathBuf,
    dpi: u32,
    timeout: Duration,
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new("pdftoppm", DEFAULT_DPI, Duration::from_secs(300))
    }
}

impl PdftoppmRasterizer {
    pub fn new(program: impl Into<PathBuf>, dpi: u32, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            dpi,
            timeout,
        }
    }
}

#[async_trait]
impl Rasterizer for PdftoppmRasterizer {
    async fn rasterize(&self, path: &Path) -> Result<Vec<PageImage>> {
        let dir = tempfile::tempdir()?;
        let program = self.program.display().to_string();

        let mut command = Command::new(&self.program);
        command
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-png")
            .arg(path)
            .arg(dir.path().join("page"));

        let output = run_command(command, &program, self.timeout).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScriptscanError::validation(format!(
                "pdftoppm could not render {}: {}",
                path.display(),
                stderr.trim()
            )));
        }

        let pages = read_rendered_pages(dir.path()).await?;
        tracing::debug!(path = %path.display(), pages = pages.len(), dpi = self.dpi, "Rasterized PDF");
        Ok(pages)
    }
}

/// Treats a single image file as a one-page document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRasterizer;

#[async_trait]
impl Rasterizer for ImageRasterizer {
    async fn rasterize(&self, path: &Path) -> Result<Vec<PageImage>> {
        let bytes = read_file_async(path).await?;
        Ok(vec![PageImage::new(bytes)])
    }
}

/// Pick a rasterizer for `path` by sniffing its content.
///
/// # Errors
///
/// Returns `ScriptscanError::Validation` for content that is neither a PDF nor
/// an image.
pub fn rasterizer_for(path: &Path, pdf: PdftoppmRasterizer) -> Result<Arc<dyn Rasterizer>> {
    let kind = infer::get_from_path(path)?;
    match kind {
        Some(kind) if kind.mime_type() == PDF_MIME_TYPE => Ok(Arc::new(pdf)),
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => Ok(Arc::new(ImageRasterizer)),
        Some(kind) => Err(ScriptscanError::validation(format!(
            "Unsupported document type {} for {}",
            kind.mime_type(),
            path.display()
        ))),
        None => Err(ScriptscanError::validation(format!(
            "Could not determine document type of {}",
            path.display()
        ))),
    }
}

async fn read_rendered_pages(dir: &Path) -> Result<Vec<PageImage>> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let path = entry.path();
        let is_png = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png {
            entries.push(path);
        }
    }

    // pdftoppm zero-pads page numbers only up to the width of the last page
    entries.sort_by_key(|path| {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(page_index_from_name)
            .unwrap_or(u32::MAX)
    });

    let mut pages = Vec::with_capacity(entries.len());
    for path in entries {
        pages.push(PageImage::new(read_file_async(&path).await?));
    }
    Ok(pages)
}

/// Trailing page number of a rendered file stem such as `page-07`.
fn page_index_from_name(name: &str) -> Option<u32> {
    let digits: String = name
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D, b'I', b'H', b'D', b'R'];

    #[test]
    fn test_page_index_from_name() {
        assert_eq!(page_index_from_name("page-1"), Some(1));
        assert_eq!(page_index_from_name("page-012"), Some(12));
        assert_eq!(page_index_from_name("page"), None);
    }

    #[test]
    fn test_page_image_sniffing() {
        let image = PageImage::new(PNG_HEADER.to_vec());
        assert_eq!(image.mime_type(), Some("image/png"));
        assert_eq!(image.extension(), "png");

        let unknown = PageImage::new(b"not an image".to_vec());
        assert_eq!(unknown.mime_type(), None);
        assert_eq!(unknown.extension(), "png");
    }

    #[tokio::test]
    async fn test_image_rasterizer_single_page() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        std::io::Write::write_all(&mut file, PNG_HEADER).unwrap();

        let pages = ImageRasterizer.rasterize(file.path()).await.unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].bytes(), PNG_HEADER);
    }

    #[tokio::test]
    async fn test_rendered_pages_sorted_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for (name, byte) in [("page-10.png", 10u8), ("page-02.png", 2), ("page-01.png", 1), ("notes.txt", 0)] {
            std::fs::write(dir.path().join(name), [byte]).unwrap();
        }

        let pages = read_rendered_pages(dir.path()).await.unwrap();
        let order: Vec<u8> = pages.iter().map(|p| p.bytes()[0]).collect();
        assert_eq!(order, vec![1, 2, 10]);
    }

    #[test]
    fn test_rasterizer_for_rejects_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"plain text, not a document").unwrap();
        assert!(matches!(
            rasterizer_for(file.path(), PdftoppmRasterizer::default()),
            Err(ScriptscanError::Validation { .. })
        ));
    }

    #[test]
    fn test_rasterizer_for_accepts_pdf() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n").unwrap();
        assert!(rasterizer_for(file.path(), PdftoppmRasterizer::default()).is_ok());
    }
}
