use serde::{Deserialize, Serialize};

/// One recognized word with its time span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedWord {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl TimedWord {
    pub fn new(text: impl Into<String>, start_ms: u64, end_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            end_ms,
        }
    }
}

/// Words produced by one finalize call of the recognizer.
/// Empty when the segment held no decodable speech.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionBatch {
    pub words: Vec<TimedWord>,
}

impl RecognitionBatch {
    pub fn new(words: Vec<TimedWord>) -> Self {
        Self { words }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

/// Every word recognized for one request, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    words: Vec<TimedWord>,
    /// Exclusive end index of each non-empty utterance
    utterance_ends: Vec<usize>,
}

impl Transcript {
    /// Transcript treated as a single utterance
    pub fn from_words(words: Vec<TimedWord>) -> Self {
        let utterance_ends = match words.len() {
            0 => Vec::new(),
            n => vec![n],
        };
        Self {
            words,
            utterance_ends,
        }
    }

    pub(crate) fn from_parts(words: Vec<TimedWord>, utterance_ends: Vec<usize>) -> Self {
        Self {
            words,
            utterance_ends,
        }
    }

    pub fn words(&self) -> &[TimedWord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word slices as the recognizer finalized them
    pub fn utterances(&self) -> impl Iterator<Item = &[TimedWord]> + '_ {
        let mut start = 0;
        self.utterance_ends.iter().map(move |&end| {
            let slice = &self.words[start..end];
            start = end;
            slice
        })
    }
}
