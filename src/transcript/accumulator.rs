use super::words::{RecognitionBatch, Transcript, TimedWord};
use tracing::{debug, warn};

/// Collects finalized batches, in call order, into a flat transcript
#[derive(Debug, Default)]
pub struct TranscriptAccumulator {
    words: Vec<TimedWord>,
    utterance_ends: Vec<usize>,
    batches: usize,
}

impl TranscriptAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the transcript with one batch. Batches are never merged,
    /// reordered or deduplicated.
    pub fn append(&mut self, batch: RecognitionBatch) {
        self.batches += 1;

        if batch.is_empty() {
            debug!("Batch {} is empty (no speech)", self.batches);
            return;
        }

        if let (Some(last), Some(first)) = (self.words.last(), batch.words.first()) {
            if first.start_ms < last.start_ms {
                warn!(
                    "Recognizer emitted '{}' at {}ms before '{}' at {}ms",
                    first.text, first.start_ms, last.text, last.start_ms
                );
            }
        }

        debug!("Batch {}: {} words", self.batches, batch.len());
        self.words.extend(batch.words);
        self.utterance_ends.push(self.words.len());
    }

    /// Number of batches appended, including empty ones
    pub fn batch_count(&self) -> usize {
        self.batches
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn finalize(self) -> Transcript {
        Transcript::from_parts(self.words, self.utterance_ends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(words: &[(&str, u64, u64)]) -> RecognitionBatch {
        RecognitionBatch::new(
            words
                .iter()
                .map(|&(t, s, e)| TimedWord::new(t, s, e))
                .collect(),
        )
    }

    #[test]
    fn test_append_preserves_order() {
        let mut acc = TranscriptAccumulator::new();
        acc.append(batch(&[("hello", 0, 400), ("world", 400, 900)]));
        acc.append(batch(&[("again", 1500, 2000)]));

        let transcript = acc.finalize();
        let texts: Vec<_> = transcript.words().iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", "world", "again"]);
    }

    #[test]
    fn test_empty_batches_yield_empty_transcript() {
        let mut acc = TranscriptAccumulator::new();
        acc.append(RecognitionBatch::empty());
        acc.append(RecognitionBatch::empty());

        assert_eq!(acc.batch_count(), 2);
        let transcript = acc.finalize();
        assert!(transcript.is_empty());
        assert_eq!(transcript.utterances().count(), 0);
    }

    #[test]
    fn test_utterance_boundaries_follow_batches() {
        let mut acc = TranscriptAccumulator::new();
        acc.append(batch(&[("a", 0, 100), ("b", 100, 200)]));
        acc.append(RecognitionBatch::empty());
        acc.append(batch(&[("c", 300, 400)]));

        let transcript = acc.finalize();
        let sizes: Vec<_> = transcript.utterances().map(|u| u.len()).collect();
        assert_eq!(sizes, vec![2, 1]);
    }
}
