//! Text-line collaborators.
//!
//! Each source turns one media file into the ordered line sequence the
//! scenario builder consumes. Decoding and recognition are delegated to
//! external tools (`ffmpeg`, `tesseract`, `pdftoppm`) and the `pdf-extract`
//! crate.

pub mod error;
pub mod ocr;
pub mod pdf;
pub mod video;

pub use error::ExtractError;
pub use ocr::OcrEngine;
pub use pdf::PdfSource;
pub use video::VideoSource;

use crate::utils::config::Config;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Produces recognised text lines from one media file
#[async_trait]
pub trait LineSource: Send + Sync {
    async fn lines(&self, path: &Path) -> Result<Vec<String>, ExtractError>;
}

/// Media families the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Pdf,
    Video,
}

impl MediaKind {
    /// Every non-PDF upload is treated as a screen recording
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => MediaKind::Pdf,
            _ => MediaKind::Video,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Pdf => "PDF",
            MediaKind::Video => "video",
        }
    }
}

/// Build the source for a media kind
pub async fn source_for(
    kind: MediaKind,
    config: &Config,
) -> Result<Box<dyn LineSource>, ExtractError> {
    Ok(match kind {
        MediaKind::Pdf => Box::new(PdfSource::new(config)),
        MediaKind::Video => {
            let engine = OcrEngine::new(&config.ocr_language).await?;
            Box::new(VideoSource::new(engine, config.frame_rate))
        }
    })
}

/// Extract lines from a file, failing when nothing was recognised
pub async fn extract_lines(path: &Path, config: &Config) -> Result<Vec<String>, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }

    let kind = MediaKind::from_path(path);
    log::info!("Extracting text from {} ({})", path.display(), kind.label());

    let source = source_for(kind, config).await?;
    let lines = source.lines(path).await?;

    log::info!("{} text extraction result: {} lines", kind.label(), lines.len());
    if lines.iter().all(|l| l.trim().is_empty()) {
        return Err(ExtractError::NoText {
            kind: kind.label(),
            path: path.to_path_buf(),
        });
    }
    Ok(lines)
}

/// Temporary working directory removed on drop
#[derive(Debug)]
pub(crate) struct ScratchDir(PathBuf);

impl ScratchDir {
    pub(crate) fn create(prefix: &str) -> Result<Self, ExtractError> {
        let path = std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&path)?;
        Ok(Self(path))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// Image files of a directory in name order
pub(crate) fn list_images(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let mut images: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map_or(false, |e| matches!(e.to_lowercase().as_str(), "png" | "jpg" | "jpeg"))
        })
        .collect();
    images.sort();
    Ok(images)
}

/// OCR every image in order, concatenating their non-empty lines
pub(crate) async fn recognize_all(
    engine: &OcrEngine,
    images: &[PathBuf],
    label: &str,
) -> Result<Vec<String>, ExtractError> {
    let progress = progress_bar(images.len() as u64, label);
    let mut lines = Vec::new();

    for image in images {
        let recognised = engine.recognize_lines(image).await?;
        log::debug!("{}: {} lines", image.display(), recognised.len());
        lines.extend(recognised.into_iter().filter(|l| !l.trim().is_empty()));
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(lines)
}

fn progress_bar(len: u64, label: &str) -> ProgressBar {
    if !std::io::stdout().is_terminal() {
        return ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::hidden());
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar().template("    {msg} [{bar:30}] {pos}/{len}") {
        pb.set_style(style);
    }
    pb.set_message(label.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_detection() {
        assert_eq!(MediaKind::from_path(Path::new("guide.pdf")), MediaKind::Pdf);
        assert_eq!(MediaKind::from_path(Path::new("GUIDE.PDF")), MediaKind::Pdf);
        assert_eq!(MediaKind::from_path(Path::new("demo.mp4")), MediaKind::Video);
        assert_eq!(MediaKind::from_path(Path::new("noext")), MediaKind::Video);
    }

    #[test]
    fn test_list_images_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["frame_000002.png", "frame_000001.png", "notes.txt", "page-1.JPG"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let names: Vec<String> = list_images(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["frame_000001.png", "frame_000002.png", "page-1.JPG"]);
    }

    #[test]
    fn test_scratch_dir_removed_on_drop() {
        let path = {
            let scratch = ScratchDir::create("lumi-scribe-test").unwrap();
            assert!(scratch.path().is_dir());
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let err = extract_lines(Path::new("/no/such/guide.pdf"), &Config::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::NotFound(_)));
    }
}
