use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{info, warn};

/// Turns a source identifier into a local, decodable audio file
#[async_trait::async_trait]
pub trait MediaRetriever: Send + Sync {
    async fn retrieve(&self, source: &str) -> Result<PathBuf>;

    fn name(&self) -> &str;
}

/// Downloads audio with a yt-dlp compatible program into `build_dir/<id>.wav`.
/// An existing file for the same id is reused.
pub struct YtDlpRetriever {
    program: String,
    build_dir: PathBuf,
}

impl YtDlpRetriever {
    pub fn new(program: impl Into<String>, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            build_dir: build_dir.into(),
        }
    }

    pub fn wav_path(&self, video_id: &str) -> PathBuf {
        self.build_dir.join(format!("{}.wav", video_id))
    }
}

#[async_trait::async_trait]
impl MediaRetriever for YtDlpRetriever {
    async fn retrieve(&self, source: &str) -> Result<PathBuf> {
        let video_id = video_id(source)
            .with_context(|| format!("No video id in {:?}", source))?;
        let wav_path = self.wav_path(video_id);

        if tokio::fs::try_exists(&wav_path).await.unwrap_or(false) {
            info!("Using cached audio for {}: {}", video_id, wav_path.display());
            return Ok(wav_path);
        }

        tokio::fs::create_dir_all(&self.build_dir)
            .await
            .with_context(|| format!("Failed to create {}", self.build_dir.display()))?;

        let template = self.build_dir.join("%(id)s.%(ext)s");
        info!("Downloading audio for {} with {}", video_id, self.program);

        let output = Command::new(&self.program)
            .arg("--extract-audio")
            .args(["--audio-format", "wav"])
            .arg("--no-check-certificate")
            .arg("--quiet")
            .args(["--referer", source])
            .arg("--output")
            .arg(&template)
            .arg(source)
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.program))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        if !tokio::fs::try_exists(&wav_path).await.unwrap_or(false) {
            anyhow::bail!("{} did not produce {}", self.program, wav_path.display());
        }

        info!("Downloaded audio to {}", wav_path.display());
        Ok(wav_path)
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Serves paths that already exist on disk
#[derive(Debug, Default)]
pub struct LocalFileRetriever;

#[async_trait::async_trait]
impl MediaRetriever for LocalFileRetriever {
    async fn retrieve(&self, source: &str) -> Result<PathBuf> {
        let path = Path::new(source);
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            anyhow::bail!("No such file: {}", path.display());
        }
        Ok(path.to_path_buf())
    }

    fn name(&self) -> &str {
        "local"
    }
}

/// Extract the video id from `...?v=<id>` or `youtu.be/<id>` URLs
pub fn video_id(url: &str) -> Option<&str> {
    let id = if let Some((_, rest)) = url.split_once("?v=").or_else(|| url.split_once("&v=")) {
        rest
    } else if let Some((_, rest)) = url.split_once("youtu.be/") {
        rest
    } else {
        return None;
    };

    let id = id.split(['&', '?', '#', '/']).next().unwrap_or_default();
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if !valid {
        warn!("Rejecting video id {:?}", id);
        return None;
    }
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_id_watch_url() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_video_id_strips_extra_params() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=abc_-123&t=42s"),
            Some("abc_-123")
        );
        assert_eq!(
            video_id("https://www.youtube.com/watch?list=x&v=abc123"),
            Some("abc123")
        );
    }

    #[test]
    fn test_video_id_short_url() {
        assert_eq!(video_id("https://youtu.be/abc123?si=zz"), Some("abc123"));
    }

    #[test]
    fn test_video_id_rejects_path_tricks() {
        assert_eq!(video_id("https://example.com/watch?v=../../etc"), None);
        assert_eq!(video_id("https://example.com/video.mp4"), None);
        assert_eq!(video_id("https://example.com/watch?v="), None);
    }

    #[tokio::test]
    async fn test_local_file_retriever_missing() {
        let result = LocalFileRetriever.retrieve("/nonexistent/audio.wav").await;
        assert!(result.is_err());
    }
}
