use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::transcript::TimedWord;

/// Word as reported by the speech engine, times in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
    /// Confidence score (0.0 to 1.0), if available
    #[serde(default)]
    pub conf: Option<f32>,
}

impl RecognizedWord {
    pub fn to_timed_word(&self) -> TimedWord {
        let start_ms = seconds_to_ms(self.start);
        let end_ms = seconds_to_ms(self.end).max(start_ms);
        TimedWord::new(self.word.clone(), start_ms, end_ms)
    }
}

fn seconds_to_ms(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    }
}

/// One live decoder instance bound to a sample rate.
///
/// Implementations are driven strictly sequentially by `RecognizerSession`.
#[async_trait::async_trait]
pub trait Recognizer: Send {
    /// Feed mono samples. Returns the finished utterance when the engine
    /// detected a speech boundary, `None` while the utterance is still open.
    async fn accept_waveform(&mut self, samples: &[i16]) -> Result<Option<Vec<RecognizedWord>>>;

    /// Force-finalize whatever audio is still buffered
    async fn final_result(&mut self) -> Result<Vec<RecognizedWord>>;

    /// Release engine resources. Called at most once.
    async fn free(&mut self) -> Result<()>;

    /// Best-effort release when the session is dropped without `free`
    fn abandon(&mut self) {}
}

/// Shared, read-only acoustic model capability that spawns decoder instances
#[async_trait::async_trait]
pub trait RecognizerProvider: Send + Sync {
    /// Create a fresh decoder exclusively owned by one request
    async fn open_session(&self, sample_rate: u32) -> Result<Box<dyn Recognizer>>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Release the models at process shutdown
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}
