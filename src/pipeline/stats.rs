use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters for one transcription request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptionStats {
    /// When processing started
    pub started_at: DateTime<Utc>,

    /// Length of the decoded audio in seconds
    pub audio_duration_secs: f64,

    /// Sample rate the recognizer session was bound to
    pub sample_rate: u32,

    /// Frames accepted by the recognizer
    pub frames_fed: u64,

    /// Finalized recognizer batches, empty ones and the flush included
    pub batches: u64,

    /// Words in the transcript
    pub words: usize,

    /// Cues produced
    pub cues: usize,

    /// Wall-clock processing time
    pub elapsed_ms: u64,
}
