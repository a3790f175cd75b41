use super::state::AppState;
use crate::error::SubtitleError;
use crate::pipeline::{SubtitleOutput, TranscriptionStats};
use crate::subtitle::Cue;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SubtitleRequest {
    /// Video URL to subtitle
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubtitlesResponse {
    pub cues: Vec<Cue>,
    pub stats: TranscriptionStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

const SRT_CONTENT_TYPE: &str = "application/x-subrip; charset=utf-8";

// ============================================================================
// Handlers
// ============================================================================

/// POST /
/// Generate SRT subtitles for a video URL
pub async fn create_srt(State(state): State<AppState>, body: Bytes) -> Response {
    match run(&state, &body).await {
        Ok(output) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, SRT_CONTENT_TYPE)],
            output.srt,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /subtitles
/// Generate subtitles and return cues with processing statistics
pub async fn create_subtitles(State(state): State<AppState>, body: Bytes) -> Response {
    match run(&state, &body).await {
        Ok(output) => (
            StatusCode::OK,
            Json(SubtitlesResponse {
                cues: output.cues,
                stats: output.stats,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn run(state: &AppState, body: &[u8]) -> Result<SubtitleOutput, SubtitleError> {
    // Anything that isn't a JSON object with a url counts as missing input
    let req: SubtitleRequest = serde_json::from_slice(body).unwrap_or_default();
    info!("[Received VIDEO URL] {:?}", req.url);

    let output = state.service.subtitles_for(req.url.as_deref()).await?;
    info!(
        "Subtitles ready: {} cues, {} words, {}ms",
        output.stats.cues, output.stats.words, output.stats.elapsed_ms
    );
    Ok(output)
}

fn error_response(e: SubtitleError) -> Response {
    error!("[POST /] {}", e);
    (
        e.status_code(),
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}
