pub mod file;
pub mod source;

pub use file::{downmix, AudioFile};
pub use source::{AudioFrame, AudioSource, FrameSourceConfig, PcmFrameSource, SAMPLE_WIDTH};
