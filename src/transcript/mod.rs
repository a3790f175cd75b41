//! Timed words and their per-request accumulation

mod accumulator;
mod words;

pub use accumulator::TranscriptAccumulator;
pub use words::{RecognitionBatch, TimedWord, Transcript};
