use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transcript::TimedWord;

/// One subtitle display unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

impl Cue {
    /// Cue spanning a contiguous, non-empty run of words
    pub fn from_words(words: &[TimedWord]) -> Option<Self> {
        let first = words.first()?;
        let last = words.last()?;

        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Some(Self {
            start_ms: first.start_ms,
            end_ms: last.end_ms,
            text: text.trim().to_string(),
        })
    }
}

/// Broken cue invariant. Always a bug in the segmenter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CueInvariantError {
    #[error("cue {index} ends at {end_ms}ms before it starts at {start_ms}ms")]
    Inverted {
        index: usize,
        start_ms: u64,
        end_ms: u64,
    },

    #[error("cue {index} starts at {start_ms}ms, before cue {prev} ends at {prev_end_ms}ms")]
    Overlap {
        index: usize,
        prev: usize,
        start_ms: u64,
        prev_end_ms: u64,
    },

    #[error("cue {index} has surrounding whitespace: {text:?}")]
    Untrimmed { index: usize, text: String },

    #[error("cues hold {actual} words, transcript has {expected}")]
    Coverage { expected: usize, actual: usize },
}

/// Check that cues are ordered, non-overlapping, trimmed and cover `words` exactly once.
///
/// Adjacent cues may share a boundary instant (`next.start_ms == prev.end_ms`).
pub fn validate_cues(cues: &[Cue], words: &[TimedWord]) -> Result<(), CueInvariantError> {
    for (index, cue) in cues.iter().enumerate() {
        if cue.end_ms < cue.start_ms {
            return Err(CueInvariantError::Inverted {
                index,
                start_ms: cue.start_ms,
                end_ms: cue.end_ms,
            });
        }
        if cue.text.trim() != cue.text {
            return Err(CueInvariantError::Untrimmed {
                index,
                text: cue.text.clone(),
            });
        }
        if index > 0 {
            let prev = &cues[index - 1];
            if cue.start_ms < prev.end_ms {
                return Err(CueInvariantError::Overlap {
                    index,
                    prev: index - 1,
                    start_ms: cue.start_ms,
                    prev_end_ms: prev.end_ms,
                });
            }
        }
    }

    let actual: usize = cues.iter().map(|c| c.text.split_whitespace().count()).sum();
    let expected: usize = words.iter().map(|w| w.text.split_whitespace().count()).sum();
    if actual != expected {
        return Err(CueInvariantError::Coverage { expected, actual });
    }

    Ok(())
}
