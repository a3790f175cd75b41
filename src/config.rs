use anyhow::Result;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use crate::subtitle::SegmentationPolicy;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub media: MediaConfig,
    pub recognizer: RecognizerConfig,
    pub subtitles: SubtitlesConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct MediaConfig {
    /// Directory the downloader writes extracted audio into
    pub build_dir: PathBuf,
    /// Downloader executable (yt-dlp compatible)
    #[serde(default = "default_downloader")]
    pub downloader: String,
}

#[derive(Debug, Deserialize)]
pub struct RecognizerConfig {
    pub nats_url: String,
    pub model: String,
    pub speaker_model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubtitlesConfig {
    pub words_per_line: usize,
    #[serde(default)]
    pub segmentation: SegmentationPolicy,
    #[serde(default = "default_frame_bytes")]
    pub frame_bytes: usize,
}

fn default_request_timeout_secs() -> u64 {
    600
}

fn default_downloader() -> String {
    "yt-dlp".to_string()
}

fn default_frame_bytes() -> usize {
    8000
}

impl Config {
    /// Load from `path` (extension optional), overridden by `SUBTITLER__SECTION__KEY` variables.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("SUBTITLER").separator("__"))
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.subtitles.words_per_line == 0 {
            anyhow::bail!("subtitles.words_per_line must be positive");
        }
        if self.subtitles.frame_bytes == 0 || self.subtitles.frame_bytes % 2 != 0 {
            anyhow::bail!(
                "subtitles.frame_bytes must be a positive multiple of 2, got {}",
                self.subtitles.frame_bytes
            );
        }
        Ok(())
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl SubtitlesConfig {
    pub fn words_per_line(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.words_per_line).unwrap_or(crate::subtitle::DEFAULT_WORDS_PER_LINE)
    }
}
