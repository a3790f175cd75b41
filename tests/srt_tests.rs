// Integration tests for SRT rendering and parsing

use anyhow::Result;
use std::num::NonZeroUsize;
use subtitler::srt;
use subtitler::{segment, Cue, TimedWord, Transcript};

fn cue(start_ms: u64, end_ms: u64, text: &str) -> Cue {
    Cue {
        start_ms,
        end_ms,
        text: text.to_string(),
    }
}

#[test]
fn test_serialize_block_layout() {
    let cues = vec![
        cue(870, 2610, "what zero zero zero one"),
        cue(3_723_004, 3_724_000, "later"),
    ];

    let text = srt::serialize(&cues);
    assert_eq!(
        text,
        "1\n00:00:00,870 --> 00:00:02,610\nwhat zero zero zero one\n\n\
         2\n01:02:03,004 --> 01:02:04,000\nlater\n"
    );
}

#[test]
fn test_serialize_empty_is_empty() {
    let text = srt::serialize(&[]);
    assert!(text.is_empty());
    assert!(srt::parse(&text).unwrap().is_empty());
}

#[test]
fn test_round_trip_preserves_cues() -> Result<()> {
    let cues = vec![
        cue(0, 0, "zero length"),
        cue(0, 999, "first"),
        cue(999, 60_000, "boundary shared with previous"),
        cue(59_999_001, 360_000_000, "past the hundred hour mark"),
        cue(360_000_000, 360_000_001, "ünïcödé – text"),
    ];

    let parsed = srt::parse(&srt::serialize(&cues))?;
    assert_eq!(parsed, cues);

    Ok(())
}

#[test]
fn test_round_trip_of_segmented_transcript() -> Result<()> {
    let words: Vec<TimedWord> = (0..17)
        .map(|i| TimedWord::new(format!("word{}", i), i * 333, i * 333 + 300))
        .collect();
    let cues = segment(&Transcript::from_words(words), NonZeroUsize::new(7).unwrap());

    assert_eq!(srt::parse(&srt::serialize(&cues))?, cues);

    Ok(())
}

#[test]
fn test_parse_tolerates_crlf_bom_and_extra_blank_lines() -> Result<()> {
    let text = "\u{feff}1\r\n00:00:01,000 --> 00:00:02,500\r\nhello\r\nthere\r\n\r\n\r\n\
                2\r\n00:00:03,000 --> 00:00:04,000 X1:10 X2:20\r\nbye\r\n";

    let cues = srt::parse(text)?;
    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0], cue(1000, 2500, "hello\nthere"));
    assert_eq!(cues[1], cue(3000, 4000, "bye"));

    Ok(())
}

#[test]
fn test_parse_rejects_malformed_timing() {
    let text = "1\n00:00:01,000 -> 00:00:02,000\nhello\n";
    assert!(srt::parse(text).is_err());

    let text = "one\n00:00:01,000 --> 00:00:02,000\nhello\n";
    assert!(srt::parse(text).is_err());
}
