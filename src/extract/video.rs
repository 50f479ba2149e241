use super::{list_images, recognize_all, ExtractError, LineSource, OcrEngine, ScratchDir};
use crate::utils::binary_resolver;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Screen recording source: sample frames with ffmpeg, OCR each frame
pub struct VideoSource {
    engine: OcrEngine,
    frame_rate: u32,
}

impl VideoSource {
    pub fn new(engine: OcrEngine, frame_rate: u32) -> Self {
        Self {
            engine,
            frame_rate: frame_rate.max(1),
        }
    }

    async fn extract_frames(&self, video: &Path, out_dir: &Path) -> Result<usize, ExtractError> {
        let ffmpeg = binary_resolver::find_binary("ffmpeg")?;
        log::info!(
            "Extracting frames from {} at {} fps",
            video.display(),
            self.frame_rate
        );

        let output = Command::new(&ffmpeg)
            .args(frame_args(video, out_dir, self.frame_rate))
            .output()
            .await?;

        if !output.status.success() {
            return Err(ExtractError::tool_failed("ffmpeg", &output.stderr));
        }

        let count = list_images(out_dir)?.len();
        log::info!("Extracted {} frames", count);
        Ok(count)
    }
}

#[async_trait]
impl LineSource for VideoSource {
    async fn lines(&self, path: &Path) -> Result<Vec<String>, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::NotFound(path.to_path_buf()));
        }

        let frames = ScratchDir::create("lumi-scribe-frames")?;
        self.extract_frames(path, frames.path()).await?;

        let images = list_images(frames.path())?;
        recognize_all(&self.engine, &images, "frames").await
    }
}

/// ffmpeg arguments writing `frame_000001.png`, ... into `out_dir`
fn frame_args(video: &Path, out_dir: &Path, frame_rate: u32) -> Vec<String> {
    vec![
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-i".to_string(),
        video.to_string_lossy().to_string(),
        "-vf".to_string(),
        format!("fps={}", frame_rate),
        out_dir.join("frame_%06d.png").to_string_lossy().to_string(),
    ]
}
