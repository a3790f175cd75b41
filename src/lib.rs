pub mod audio;
pub mod config;
pub mod error;
pub mod http;
pub mod media;
pub mod nats;
pub mod pipeline;
pub mod recognizer;
pub mod subtitle;
pub mod transcript;

pub use audio::{AudioFile, AudioFrame, AudioSource, FrameSourceConfig, PcmFrameSource};
pub use config::Config;
pub use error::SubtitleError;
pub use http::{create_router, AppState};
pub use media::{LocalFileRetriever, MediaRetriever, YtDlpRetriever};
pub use nats::NatsRecognizerProvider;
pub use pipeline::{PipelineConfig, SubtitleOutput, SubtitlePipeline, SubtitleService, TranscriptionStats};
pub use recognizer::{FeedOutcome, Recognizer, RecognizerProvider, RecognizerSession};
pub use subtitle::{segment, srt, Cue, SegmentationPolicy};
pub use transcript::{RecognitionBatch, TimedWord, Transcript, TranscriptAccumulator};
