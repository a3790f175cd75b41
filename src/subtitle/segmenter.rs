//! Word-count windowing of transcripts into cues

use serde::Deserialize;
use std::num::NonZeroUsize;

use super::cue::{validate_cues, Cue};
use crate::transcript::{TimedWord, Transcript};

pub const DEFAULT_WORDS_PER_LINE: NonZeroUsize = match NonZeroUsize::new(7) {
    Some(n) => n,
    None => panic!("words per line must be non-zero"),
};

/// Strategy turning a transcript into ordered cues
pub trait CueSegmenter: Send + Sync {
    fn segment(&self, transcript: &Transcript) -> Vec<Cue>;
}

/// Which segmenter a deployment uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentationPolicy {
    /// Window over the whole transcript
    #[default]
    FixedWindow,
    /// Restart the window at each recognizer utterance
    PerUtterance,
}

impl SegmentationPolicy {
    pub fn segmenter(self, words_per_line: NonZeroUsize) -> Box<dyn CueSegmenter> {
        match self {
            Self::FixedWindow => Box::new(FixedWindow::new(words_per_line)),
            Self::PerUtterance => Box::new(PerUtterance::new(words_per_line)),
        }
    }
}

/// Fixed word-count windows over the full transcript
#[derive(Debug, Clone, Copy)]
pub struct FixedWindow {
    words_per_line: NonZeroUsize,
}

impl FixedWindow {
    pub fn new(words_per_line: NonZeroUsize) -> Self {
        Self { words_per_line }
    }
}

impl CueSegmenter for FixedWindow {
    fn segment(&self, transcript: &Transcript) -> Vec<Cue> {
        window(transcript.words(), self.words_per_line)
    }
}

/// Fixed word-count windows, never spanning two recognizer utterances
#[derive(Debug, Clone, Copy)]
pub struct PerUtterance {
    words_per_line: NonZeroUsize,
}

impl PerUtterance {
    pub fn new(words_per_line: NonZeroUsize) -> Self {
        Self { words_per_line }
    }
}

impl CueSegmenter for PerUtterance {
    fn segment(&self, transcript: &Transcript) -> Vec<Cue> {
        let cues: Vec<Cue> = transcript
            .utterances()
            .flat_map(|words| window(words, self.words_per_line))
            .collect();
        check(&cues, transcript.words());
        cues
    }
}

/// Group `transcript` into cues of `words_per_line` words, the last cue taking the remainder
pub fn segment(transcript: &Transcript, words_per_line: NonZeroUsize) -> Vec<Cue> {
    FixedWindow::new(words_per_line).segment(transcript)
}

/// A cue closes on every word whose 1-based position, counted from the start
/// of `words`, is a multiple of `words_per_line`.
fn window(words: &[TimedWord], words_per_line: NonZeroUsize) -> Vec<Cue> {
    let per_line = words_per_line.get();
    let mut cues = Vec::with_capacity(words.len().div_ceil(per_line));

    let mut line_start = 0;
    for i in 0..words.len() {
        if (i + 1) % per_line == 0 {
            cues.extend(Cue::from_words(&words[line_start..=i]));
            line_start = i + 1;
        }
    }

    if line_start < words.len() {
        cues.extend(Cue::from_words(&words[line_start..]));
    }

    check(&cues, words);
    cues
}

fn check(cues: &[Cue], words: &[TimedWord]) {
    let ordered_input = words
        .windows(2)
        .all(|pair| pair[0].start_ms <= pair[0].end_ms && pair[0].end_ms <= pair[1].start_ms);
    if ordered_input {
        debug_assert_eq!(validate_cues(cues, words), Ok(()));
    }
}
