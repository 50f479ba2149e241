use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How text is pulled out of a PDF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PdfMethod {
    /// Read the embedded text layer, falling back to OCR when it is empty
    #[default]
    Native,
    /// Render every page and OCR it
    Ocr,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Frames sampled per second of video
    pub frame_rate: u32,

    /// Tesseract language pack(s), e.g. "eng" or "eng+vie"
    pub ocr_language: String,

    /// PDF extraction method
    pub pdf_method: PdfMethod,

    /// DPI used when rasterising PDF pages for OCR
    pub pdf_render_dpi: u32,

    /// Process files of a directory concurrently
    pub parallel: bool,

    /// File extensions treated as screen recordings when walking a directory
    pub video_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_rate: 1,
            ocr_language: "eng".to_string(),
            pdf_method: PdfMethod::Native,
            pdf_render_dpi: 200,
            parallel: false,
            video_extensions: ["mp4", "mov", "avi", "mkv", "webm"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// On-disk overrides; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    frame_rate: Option<u32>,
    #[serde(alias = "lang")]
    ocr_language: Option<String>,
    pdf_method: Option<PdfMethod>,
    pdf_render_dpi: Option<u32>,
    parallel: Option<bool>,
    video_extensions: Option<Vec<String>>,
}

impl Config {
    /// Defaults overlaid with `~/.lumi-scribe/config.yaml` when present
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut config = Self::default();
        if content.trim().is_empty() {
            return Ok(config);
        }

        let file: ConfigFile =
            serde_yaml::from_str(content).context("Failed to parse YAML config")?;

        if let Some(rate) = file.frame_rate {
            config.frame_rate = rate;
        }
        if let Some(lang) = file.ocr_language {
            config.ocr_language = lang;
        }
        if let Some(method) = file.pdf_method {
            config.pdf_method = method;
        }
        if let Some(dpi) = file.pdf_render_dpi {
            config.pdf_render_dpi = dpi;
        }
        if let Some(parallel) = file.parallel {
            config.parallel = parallel;
        }
        if let Some(exts) = file.video_extensions {
            config.video_extensions = exts
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_rate == 0 {
            anyhow::bail!("frameRate must be at least 1");
        }
        if self.ocr_language.trim().is_empty() {
            anyhow::bail!("ocrLanguage must not be empty");
        }
        Ok(())
    }

    pub fn is_video_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.video_extensions.iter().any(|e| *e == ext)
    }
}

/// Per-user directory for config and bundled tools
pub fn install_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".lumi-scribe"))
}

pub fn default_config_path() -> Option<PathBuf> {
    install_dir().map(|d| d.join("config.yaml"))
}
