use crate::pipeline::SubtitleService;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Request flow shared by all handlers; holds no per-request state
    pub service: Arc<SubtitleService>,
}

impl AppState {
    pub fn new(service: SubtitleService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
