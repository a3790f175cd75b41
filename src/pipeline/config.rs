use std::num::NonZeroUsize;
use std::time::Duration;

use crate::audio::FrameSourceConfig;
use crate::config::Config;
use crate::subtitle::{SegmentationPolicy, DEFAULT_WORDS_PER_LINE};

/// Per-request pipeline settings
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Words grouped into one cue
    pub words_per_line: NonZeroUsize,

    /// Cue segmentation strategy
    pub segmentation: SegmentationPolicy,

    /// How audio is chunked before it reaches the recognizer
    pub frames: FrameSourceConfig,

    /// Deadline for one transcription, if any
    pub timeout: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            words_per_line: DEFAULT_WORDS_PER_LINE,
            segmentation: SegmentationPolicy::FixedWindow,
            frames: FrameSourceConfig::default(),
            timeout: None,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            words_per_line: cfg.subtitles.words_per_line(),
            segmentation: cfg.subtitles.segmentation,
            frames: FrameSourceConfig {
                frame_bytes: cfg.subtitles.frame_bytes,
                ..FrameSourceConfig::default()
            },
            timeout: Some(cfg.service.http.request_timeout()),
        }
    }
}
