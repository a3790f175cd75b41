use axum::http::StatusCode;
use thiserror::Error;

/// Failures that abort a single subtitle request
#[derive(Debug, Error)]
pub enum SubtitleError {
    #[error("No video URL provided")]
    InputMissing,

    #[error("Could not fetch media: {0}")]
    RetrievalFailed(String),

    #[error("Could not decode media: {0}")]
    DecodeFailed(String),

    /// PCM frame whose length is not a whole number of 16-bit samples
    #[error("Invalid audio frame #{sequence}: {len} bytes is not a whole number of s16le samples")]
    InvalidFrame { sequence: u64, len: usize },

    #[error("Internal recognition error: {0}")]
    Recognition(String),

    /// Feed or flush on a session that was already flushed or closed
    #[error("Recognizer session used after {0}")]
    SessionClosed(&'static str),

    #[error("Transcription did not finish within {0:?}")]
    TimedOut(std::time::Duration),
}

impl SubtitleError {
    /// Wrap a collaborator error, keeping its context chain in the message
    pub fn retrieval(err: anyhow::Error) -> Self {
        Self::RetrievalFailed(format!("{:#}", err))
    }

    pub fn decode(err: anyhow::Error) -> Self {
        Self::DecodeFailed(format!("{:#}", err))
    }

    pub fn recognition(err: anyhow::Error) -> Self {
        Self::Recognition(format!("{:#}", err))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InputMissing => StatusCode::BAD_REQUEST,
            Self::RetrievalFailed(_) => StatusCode::BAD_GATEWAY,
            Self::DecodeFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::TimedOut(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::InvalidFrame { .. } | Self::Recognition(_) | Self::SessionClosed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
