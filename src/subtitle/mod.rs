//! Cue segmentation and SRT output

mod cue;
mod segmenter;
pub mod srt;

pub use cue::{validate_cues, Cue, CueInvariantError};
pub use segmenter::{
    segment, CueSegmenter, FixedWindow, PerUtterance, SegmentationPolicy, DEFAULT_WORDS_PER_LINE,
};
