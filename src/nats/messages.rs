use serde::{Deserialize, Serialize};

use crate::recognizer::RecognizedWord;

/// Request to create a decoder on the speech service
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenSessionMessage {
    pub session_id: String,
    pub sample_rate: u32,
    pub model: String,
    pub speaker_model: Option<String>,
    /// Ask for word-level timestamps
    pub words: bool,
}

/// Audio frame sent to an open decoder
#[derive(Debug, Serialize, Deserialize)]
pub struct AudioFrameMessage {
    pub session_id: String,
    pub sequence: u64,
    pub pcm: String,  // Base64-encoded PCM bytes
    pub sample_rate: u32,
    pub timestamp: String,  // RFC3339 timestamp
}

/// Reply to open, accept, final and free requests
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RecognizerReply {
    #[serde(default)]
    pub session_id: String,
    /// Set when the decoder closed an utterance (always true for final)
    #[serde(rename = "final", default)]
    pub finalized: bool,
    #[serde(default)]
    pub result: Vec<RecognizedWord>,
    #[serde(default)]
    pub error: Option<String>,
}
