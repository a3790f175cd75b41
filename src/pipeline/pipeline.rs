use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{error, info, warn};

use super::config::PipelineConfig;
use super::stats::TranscriptionStats;
use crate::audio::AudioFrame;
use crate::error::SubtitleError;
use crate::recognizer::{FeedOutcome, RecognizerProvider, RecognizerSession};
use crate::subtitle::{srt, Cue};
use crate::transcript::{Transcript, TranscriptAccumulator};

/// Transcript plus the counters gathered while producing it
#[derive(Debug, Clone)]
pub struct Transcription {
    pub transcript: Transcript,
    pub stats: TranscriptionStats,
}

/// Finished subtitles for one request
#[derive(Debug, Clone)]
pub struct SubtitleOutput {
    pub cues: Vec<Cue>,
    pub srt: String,
    pub stats: TranscriptionStats,
}

/// How the frame loop ended
enum StreamEnd {
    Exhausted,
    DeadlineElapsed,
}

/// Streaming transcription: frames -> recognizer session -> transcript -> cues.
///
/// Each call owns one recognizer session and releases it before returning.
#[derive(Clone)]
pub struct SubtitlePipeline {
    provider: Arc<dyn RecognizerProvider>,
    config: PipelineConfig,
}

impl SubtitlePipeline {
    pub fn new(provider: Arc<dyn RecognizerProvider>, config: PipelineConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Deadline for a request starting now, if a timeout is configured
    pub fn deadline(&self) -> Option<Instant> {
        self.config.timeout.map(|t| Instant::now() + t)
    }

    /// Feed every frame, in arrival order, to a fresh recognizer session.
    ///
    /// The session is flushed and closed on every path: exhausted stream,
    /// early end, elapsed deadline or error. The work runs on its own task,
    /// so dropping the returned future does not cut that cleanup short.
    pub async fn transcribe(
        &self,
        sample_rate: u32,
        frames: mpsc::Receiver<AudioFrame>,
    ) -> Result<Transcription, SubtitleError> {
        self.transcribe_until(sample_rate, frames, self.deadline()).await
    }

    /// Like [`transcribe`](Self::transcribe), against a deadline the caller
    /// already started
    pub async fn transcribe_until(
        &self,
        sample_rate: u32,
        frames: mpsc::Receiver<AudioFrame>,
        deadline: Option<Instant>,
    ) -> Result<Transcription, SubtitleError> {
        let pipeline = self.clone();
        tokio::spawn(async move { pipeline.run(sample_rate, frames, deadline).await })
            .await
            .map_err(|e| SubtitleError::Recognition(format!("Transcription task failed: {}", e)))?
    }

    async fn run(
        &self,
        sample_rate: u32,
        mut frames: mpsc::Receiver<AudioFrame>,
        deadline: Option<Instant>,
    ) -> Result<Transcription, SubtitleError> {
        let started = Instant::now();
        let started_at = Utc::now();

        let engine = self
            .provider
            .open_session(sample_rate)
            .await
            .map_err(SubtitleError::recognition)?;
        let mut session = RecognizerSession::new(engine, sample_rate);
        let mut accumulator = TranscriptAccumulator::new();

        let fed = Self::drive(&mut session, &mut accumulator, &mut frames, deadline).await;
        // Stop the producer before the potentially slow flush
        frames.close();

        let flushed = session.flush().await;
        let closed = session.close().await;

        let end = fed?;
        accumulator.append(flushed?);
        closed?;

        if let StreamEnd::DeadlineElapsed = end {
            let timeout = self.config.timeout.unwrap_or_default();
            warn!("Transcription exceeded {:?}, discarding results", timeout);
            return Err(SubtitleError::TimedOut(timeout));
        }

        let stats = TranscriptionStats {
            started_at,
            sample_rate,
            frames_fed: session.frames_fed(),
            batches: session.batches(),
            words: accumulator.word_count(),
            elapsed_ms: started.elapsed().as_millis() as u64,
            ..TranscriptionStats::default()
        };

        let transcript = accumulator.finalize();
        if transcript.is_empty() {
            info!("No speech detected in {} frames", stats.frames_fed);
        } else {
            info!(
                "Transcribed {} words in {} batches from {} frames",
                stats.words, stats.batches, stats.frames_fed
            );
        }

        Ok(Transcription { transcript, stats })
    }

    /// Transcribe, then segment and render as SRT
    pub async fn subtitles(
        &self,
        sample_rate: u32,
        frames: mpsc::Receiver<AudioFrame>,
    ) -> Result<SubtitleOutput, SubtitleError> {
        self.subtitles_until(sample_rate, frames, self.deadline()).await
    }

    pub async fn subtitles_until(
        &self,
        sample_rate: u32,
        frames: mpsc::Receiver<AudioFrame>,
        deadline: Option<Instant>,
    ) -> Result<SubtitleOutput, SubtitleError> {
        let Transcription { transcript, mut stats } =
            self.transcribe_until(sample_rate, frames, deadline).await?;

        let cues = self.segment(&transcript);
        let srt = srt::serialize(&cues);
        stats.cues = cues.len();

        info!("Produced {} cues", cues.len());
        Ok(SubtitleOutput { cues, srt, stats })
    }

    pub fn segment(&self, transcript: &Transcript) -> Vec<Cue> {
        self.config
            .segmentation
            .segmenter(self.config.words_per_line)
            .segment(transcript)
    }

    async fn drive(
        session: &mut RecognizerSession,
        accumulator: &mut TranscriptAccumulator,
        frames: &mut mpsc::Receiver<AudioFrame>,
        deadline: Option<Instant>,
    ) -> Result<StreamEnd, SubtitleError> {
        loop {
            let next = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, frames.recv()).await {
                    Ok(next) => next,
                    Err(_) => return Ok(StreamEnd::DeadlineElapsed),
                },
                None => frames.recv().await,
            };

            let Some(frame) = next else {
                return Ok(StreamEnd::Exhausted);
            };
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Ok(StreamEnd::DeadlineElapsed);
            }

            match session.feed(&frame).await {
                Ok(FeedOutcome::Continuing) => {}
                Ok(FeedOutcome::Finalized(batch)) => accumulator.append(batch),
                Err(e) => {
                    error!("Recognition failed at frame #{}: {}", frame.sequence, e);
                    return Err(e);
                }
            }
        }
    }
}
