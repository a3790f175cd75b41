use anyhow::Result;
use std::path::PathBuf;
use subtitler::{Config, PipelineConfig, SegmentationPolicy};
use tempfile::TempDir;

const SAMPLE: &str = r#"
[service]
name = "subtitler-test"

[service.http]
bind = "127.0.0.1"
port = 3000

[media]
build_dir = "build"

[recognizer]
nats_url = "nats://localhost:4222"
model = "model"

[subtitles]
words_per_line = 5
segmentation = "per-utterance"
"#;

fn write_config(dir: &TempDir, contents: &str) -> Result<String> {
    let path: PathBuf = dir.path().join("subtitler.toml");
    std::fs::write(&path, contents)?;
    Ok(path.to_string_lossy().into_owned())
}

#[test]
fn test_load_applies_defaults() -> Result<()> {
    let dir = TempDir::new()?;
    let cfg = Config::load(&write_config(&dir, SAMPLE)?)?;

    assert_eq!(cfg.service.name, "subtitler-test");
    assert_eq!(cfg.service.http.request_timeout_secs, 600);
    assert_eq!(cfg.media.downloader, "yt-dlp");
    assert!(cfg.recognizer.speaker_model.is_none());
    assert_eq!(cfg.subtitles.frame_bytes, 8000);
    assert_eq!(cfg.subtitles.segmentation, SegmentationPolicy::PerUtterance);

    let pipeline = PipelineConfig::from(&cfg);
    assert_eq!(pipeline.words_per_line.get(), 5);
    assert_eq!(pipeline.frames.frame_bytes, 8000);
    assert_eq!(pipeline.timeout, Some(std::time::Duration::from_secs(600)));

    Ok(())
}

#[test]
fn test_load_rejects_zero_words_per_line() -> Result<()> {
    let dir = TempDir::new()?;
    let contents = SAMPLE.replace("words_per_line = 5", "words_per_line = 0");

    assert!(Config::load(&write_config(&dir, &contents)?).is_err());

    Ok(())
}

#[test]
fn test_load_rejects_odd_frame_size() -> Result<()> {
    let dir = TempDir::new()?;
    let contents = SAMPLE.replace(
        "segmentation = \"per-utterance\"",
        "segmentation = \"per-utterance\"\nframe_bytes = 4001",
    );

    assert!(Config::load(&write_config(&dir, &contents)?).is_err());

    Ok(())
}

#[test]
fn test_missing_file_fails() {
    assert!(Config::load("/nonexistent/subtitler").is_err());
}
