//! Request processing
//!
//! This module provides the `SubtitlePipeline` that drives one recognizer
//! session per request, and the `SubtitleService` wrapping it with media
//! retrieval and decoding:
//! - Frame-by-frame recognition with guaranteed flush and close
//! - Transcript accumulation
//! - Cue segmentation and SRT rendering
//! - Per-request statistics

mod config;
mod pipeline;
mod service;
mod stats;

pub use config::PipelineConfig;
pub use pipeline::{SubtitleOutput, SubtitlePipeline, Transcription};
pub use service::SubtitleService;
pub use stats::TranscriptionStats;
