//! SubRip (SRT) rendering and parsing

use anyhow::{Context, Result};
use std::fmt::Write;

use super::cue::Cue;

/// Render cues as numbered SRT blocks separated by a blank line
pub fn serialize(cues: &[Cue]) -> String {
    let mut out = String::new();

    for (i, cue) in cues.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // Writing into a String cannot fail
        let _ = write!(
            out,
            "{}\n{} --> {}\n{}\n",
            i + 1,
            format_timestamp(cue.start_ms),
            format_timestamp(cue.end_ms),
            cue.text
        );
    }

    out
}

/// `HH:MM:SS,mmm`
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let millis = ms % 1000;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

pub fn parse_timestamp(s: &str) -> Result<u64> {
    let s = s.trim();
    let (hms, millis) = s
        .split_once(',')
        .or_else(|| s.split_once('.'))
        .with_context(|| format!("Timestamp {:?} has no millisecond part", s))?;

    let mut parts = hms.split(':');
    let (Some(h), Some(m), Some(sec), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        anyhow::bail!("Timestamp {:?} is not HH:MM:SS,mmm", s);
    };

    let field = |v: &str, name: &str| -> Result<u64> {
        v.parse::<u64>()
            .with_context(|| format!("Invalid {} in timestamp {:?}", name, s))
    };

    let (hours, minutes, seconds, millis) = (
        field(h, "hours")?,
        field(m, "minutes")?,
        field(sec, "seconds")?,
        field(millis, "milliseconds")?,
    );
    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        anyhow::bail!("Timestamp {:?} is out of range", s);
    }

    hours
        .checked_mul(3_600_000)
        .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1000 + millis))
        .with_context(|| format!("Timestamp {:?} is out of range", s))
}

/// Parse SRT text back into cues. Sequence numbers are read but not trusted
/// for ordering; multi-line cue text is joined with `\n`.
pub fn parse(text: &str) -> Result<Vec<Cue>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let normalized = text.replace("\r\n", "\n");

    let mut cues = Vec::new();
    let mut lines = normalized.lines().peekable();

    loop {
        while lines.peek().is_some_and(|l| l.trim().is_empty()) {
            lines.next();
        }
        let Some(index_line) = lines.next() else {
            break;
        };

        index_line
            .trim()
            .parse::<u64>()
            .with_context(|| format!("Expected cue number, found {:?}", index_line))?;

        let timing = lines
            .next()
            .with_context(|| format!("Cue {} has no timing line", index_line.trim()))?;
        let (start, end) = timing
            .split_once("-->")
            .with_context(|| format!("Malformed timing line {:?}", timing))?;
        // Position settings may follow the end timestamp
        let end = end.split_whitespace().next().unwrap_or_default();

        let mut body = Vec::new();
        while let Some(line) = lines.peek() {
            if line.trim().is_empty() {
                break;
            }
            body.push(*line);
            lines.next();
        }

        cues.push(Cue {
            start_ms: parse_timestamp(start)?,
            end_ms: parse_timestamp(end)?,
            text: body.join("\n"),
        });
    }

    Ok(cues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "00:00:00,000");
        assert_eq!(format_timestamp(3_723_004), "01:02:03,004");
        assert_eq!(format_timestamp(100 * 3_600_000), "100:00:00,000");
    }

    #[test]
    fn test_parse_timestamp_accepts_dot() {
        assert_eq!(parse_timestamp("00:00:01.250").unwrap(), 1250);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("00:61:00,000").is_err());
        assert!(parse_timestamp("1:2").is_err());
        assert!(parse_timestamp("aa:bb:cc,ddd").is_err());
        assert!(parse_timestamp("9999999999999999:00:00,000").is_err());
        assert!(parse_timestamp("5124095576030431:00:00,000").is_err());
    }

    #[test]
    fn test_parse_huge_hours_is_an_error() {
        let text = "1\n9999999999999999:00:00,000 --> 00:00:01,000\nhi\n";
        assert!(parse(text).is_err());
    }
}
