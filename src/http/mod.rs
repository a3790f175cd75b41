//! HTTP request boundary
//!
//! - POST / - `{"url": ...}` in, SRT text out
//! - POST /subtitles - `{"url": ...}` in, cues and statistics as JSON out
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::{ErrorResponse, SubtitleRequest, SubtitlesResponse};
pub use routes::create_router;
pub use state::AppState;
