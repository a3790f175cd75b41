use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::pipeline::{SubtitleOutput, SubtitlePipeline};
use crate::audio::{AudioFile, AudioSource, PcmFrameSource};
use crate::error::SubtitleError;
use crate::media::MediaRetriever;

/// End-to-end request flow: retrieve, decode, stream, transcribe, segment, render
pub struct SubtitleService {
    retriever: Arc<dyn MediaRetriever>,
    pipeline: SubtitlePipeline,
}

impl SubtitleService {
    pub fn new(retriever: Arc<dyn MediaRetriever>, pipeline: SubtitlePipeline) -> Self {
        Self {
            retriever,
            pipeline,
        }
    }

    pub fn pipeline(&self) -> &SubtitlePipeline {
        &self.pipeline
    }

    /// Subtitles for one source identifier (URL or path, depending on the retriever)
    pub async fn subtitles_for(&self, source: Option<&str>) -> Result<SubtitleOutput, SubtitleError> {
        let source = source
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(SubtitleError::InputMissing)?;

        // The request deadline covers retrieval and decoding as well
        let deadline = self.pipeline.deadline();
        let audio = match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, self.fetch(source))
                .await
                .map_err(|_| self.timed_out("retrieval and decoding"))??,
            None => self.fetch(source).await?,
        };
        let sample_rate = audio.sample_rate;
        let duration = audio.duration_seconds;
        let mono = audio.to_mono();

        let mut frame_source =
            PcmFrameSource::new(mono, sample_rate, self.pipeline.config().frames.clone());
        let frames = frame_source
            .start()
            .await
            .map_err(SubtitleError::decode)?;

        let result = self
            .pipeline
            .subtitles_until(sample_rate, frames, deadline)
            .await;

        if let Err(e) = frame_source.stop().await {
            warn!("Failed to stop {} frame source: {}", frame_source.name(), e);
        }

        let mut output = result?;
        output.stats.audio_duration_secs = duration;
        Ok(output)
    }

    async fn fetch(&self, source: &str) -> Result<AudioFile, SubtitleError> {
        info!("[{}] Retrieving {}", self.retriever.name(), source);
        let path = self
            .retriever
            .retrieve(source)
            .await
            .map_err(SubtitleError::retrieval)?;

        Self::decode(path).await
    }

    fn timed_out(&self, stage: &str) -> SubtitleError {
        let timeout = self.pipeline.config().timeout.unwrap_or_default();
        warn!("Request exceeded {:?} during {}", timeout, stage);
        SubtitleError::TimedOut(timeout)
    }

    async fn decode(path: PathBuf) -> Result<AudioFile, SubtitleError> {
        tokio::task::spawn_blocking(move || AudioFile::open(&path))
            .await
            .map_err(|e| SubtitleError::DecodeFailed(format!("Decoder task failed: {}", e)))?
            .map_err(SubtitleError::decode)
    }
}
