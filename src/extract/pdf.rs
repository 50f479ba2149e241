use super::{list_images, recognize_all, ExtractError, LineSource, OcrEngine, ScratchDir};
use crate::utils::binary_resolver;
use crate::utils::config::{Config, PdfMethod};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// PDF export source: text layer first, page OCR as fallback
pub struct PdfSource {
    method: PdfMethod,
    language: String,
    render_dpi: u32,
}

impl PdfSource {
    pub fn new(config: &Config) -> Self {
        Self {
            method: config.pdf_method,
            language: config.ocr_language.clone(),
            render_dpi: config.pdf_render_dpi,
        }
    }

    async fn native_lines(&self, path: &Path) -> Result<Vec<String>, ExtractError> {
        let bytes = tokio::fs::read(path).await?;
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| ExtractError::Pdf(e.to_string()))?
        .map_err(ExtractError::Pdf)?;
        Ok(split_pages(&text))
    }

    async fn ocr_lines(&self, path: &Path) -> Result<Vec<String>, ExtractError> {
        let engine = OcrEngine::new(&self.language).await?;
        let pdftoppm = binary_resolver::find_binary("pdftoppm")?;
        let pages = ScratchDir::create("lumi-scribe-pages")?;

        log::info!("Converting PDF to images...");
        let output = Command::new(&pdftoppm)
            .arg("-r")
            .arg(self.render_dpi.to_string())
            .arg("-png")
            .arg(path)
            .arg(pages.path().join("page"))
            .output()
            .await?;
        if !output.status.success() {
            return Err(ExtractError::tool_failed("pdftoppm", &output.stderr));
        }

        let images = list_images(pages.path())?;
        log::info!("Converted PDF to {} images", images.len());
        recognize_all(&engine, &images, "pages").await
    }
}

#[async_trait]
impl LineSource for PdfSource {
    async fn lines(&self, path: &Path) -> Result<Vec<String>, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::NotFound(path.to_path_buf()));
        }

        if self.method == PdfMethod::Native {
            let native = self.native_lines(path).await;
            match native {
                Ok(lines) if native_usable(&lines) => {
                    log::info!("Extracted {} lines using native method", lines.len());
                    return Ok(lines);
                }
                Ok(_) => log::warn!("No text extracted using native method, falling back to OCR"),
                Err(e) => log::warn!("Native PDF extraction failed ({}), falling back to OCR", e),
            }
        }

        let lines = self.ocr_lines(path).await?;
        log::info!("Extracted {} lines using OCR method", lines.len());
        Ok(lines)
    }
}

/// Whether a text layer is worth keeping over page OCR
pub fn native_usable(lines: &[String]) -> bool {
    lines.iter().any(|l| !l.trim().is_empty())
}

/// Split extracted text into lines, page by page, skipping blank pages
pub fn split_pages(text: &str) -> Vec<String> {
    text.split('\x0C')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .flat_map(|page| page.lines().map(|l| l.to_string()))
        .collect()
}
