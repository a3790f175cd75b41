use tracing::{debug, info, warn};

use super::engine::{RecognizedWord, Recognizer};
use crate::audio::{AudioFrame, SAMPLE_WIDTH};
use crate::error::SubtitleError;
use crate::transcript::RecognitionBatch;

/// Result of feeding one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    /// Voice activity still open, no result yet
    Continuing,
    /// A speech segment ended; may be empty
    Finalized(RecognitionBatch),
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Finalizing,
    Closed,
}

/// One decoder instance driven frame by frame: `Open -> Finalizing -> Closed`.
///
/// `feed` is only valid while open, `flush` exactly once, and `close` must run
/// once on every exit path.
pub struct RecognizerSession {
    engine: Box<dyn Recognizer>,
    sample_rate: u32,
    state: SessionState,
    frames_fed: u64,
    batches: u64,
}

impl RecognizerSession {
    pub fn new(engine: Box<dyn Recognizer>, sample_rate: u32) -> Self {
        info!("Recognizer session opened at {}Hz", sample_rate);
        Self {
            engine,
            sample_rate,
            state: SessionState::Open,
            frames_fed: 0,
            batches: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frames_fed(&self) -> u64 {
        self.frames_fed
    }

    /// Finalized batches produced so far, flush included
    pub fn batches(&self) -> u64 {
        self.batches
    }

    pub async fn feed(&mut self, frame: &AudioFrame) -> Result<FeedOutcome, SubtitleError> {
        match self.state {
            SessionState::Open => {}
            SessionState::Finalizing => return Err(SubtitleError::SessionClosed("flush")),
            SessionState::Closed => return Err(SubtitleError::SessionClosed("close")),
        }

        if frame.pcm.len() % SAMPLE_WIDTH != 0 {
            return Err(SubtitleError::InvalidFrame {
                sequence: frame.sequence,
                len: frame.pcm.len(),
            });
        }
        if frame.sample_rate != self.sample_rate {
            warn!(
                "Frame #{} is {}Hz, session is bound to {}Hz",
                frame.sequence, frame.sample_rate, self.sample_rate
            );
        }

        let samples: Vec<i16> = frame
            .pcm
            .chunks_exact(SAMPLE_WIDTH)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();

        let result = self
            .engine
            .accept_waveform(&samples)
            .await
            .map_err(SubtitleError::recognition)?;
        self.frames_fed += 1;

        Ok(match result {
            Some(words) => {
                let batch = self.batch(words);
                debug!(
                    "Frame #{} closed a segment with {} words",
                    frame.sequence,
                    batch.len()
                );
                FeedOutcome::Finalized(batch)
            }
            None => FeedOutcome::Continuing,
        })
    }

    /// Force-finalize the open segment. Valid once, after the last frame.
    pub async fn flush(&mut self) -> Result<RecognitionBatch, SubtitleError> {
        match self.state {
            SessionState::Open => {}
            SessionState::Finalizing => return Err(SubtitleError::SessionClosed("flush")),
            SessionState::Closed => return Err(SubtitleError::SessionClosed("close")),
        }
        self.state = SessionState::Finalizing;

        let words = self
            .engine
            .final_result()
            .await
            .map_err(SubtitleError::recognition)?;
        let batch = self.batch(words);

        debug!("Flush produced {} words", batch.len());
        Ok(batch)
    }

    /// Release the engine. A second call is a no-op.
    pub async fn close(&mut self) -> Result<(), SubtitleError> {
        if self.state == SessionState::Closed {
            warn!("Recognizer session already closed");
            return Ok(());
        }
        self.state = SessionState::Closed;

        info!(
            "Closing recognizer session ({} frames, {} batches)",
            self.frames_fed, self.batches
        );
        self.engine.free().await.map_err(SubtitleError::recognition)
    }

    fn batch(&mut self, words: Vec<RecognizedWord>) -> RecognitionBatch {
        self.batches += 1;
        RecognitionBatch::new(words.iter().map(RecognizedWord::to_timed_word).collect())
    }
}

impl Drop for RecognizerSession {
    fn drop(&mut self) {
        if self.state != SessionState::Closed {
            warn!("Recognizer session dropped without close, abandoning engine");
            self.engine.abandon();
        }
    }
}
