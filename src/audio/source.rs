use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Bytes per s16le sample
pub const SAMPLE_WIDTH: usize = 2;

/// One chunk of mono PCM audio (16-bit little-endian)
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Raw s16le bytes
    pub pcm: Vec<u8>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Position of this frame in the stream, starting at 0
    pub sequence: u64,
    /// Offset of the first sample in milliseconds since stream start
    pub timestamp_ms: u64,
}

impl AudioFrame {
    pub fn sample_count(&self) -> usize {
        self.pcm.len() / SAMPLE_WIDTH
    }
}

/// Configuration for a frame source
#[derive(Debug, Clone)]
pub struct FrameSourceConfig {
    /// Bytes per emitted frame (must be even)
    pub frame_bytes: usize,
    /// Frames buffered ahead of the consumer
    pub channel_capacity: usize,
}

impl Default for FrameSourceConfig {
    fn default() -> Self {
        Self {
            frame_bytes: 8000,   // 250ms at 16kHz
            channel_capacity: 32,
        }
    }
}

/// Producer of ordered PCM frames
#[async_trait::async_trait]
pub trait AudioSource: Send {
    /// Start producing audio
    ///
    /// Returns a channel receiver that yields frames in stream order and
    /// closes once the stream is exhausted
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>>;

    /// Stop producing early; the receiver closes after in-flight frames
    async fn stop(&mut self) -> Result<()>;

    /// Check if frames are still being produced
    fn is_streaming(&self) -> bool;

    /// Source name for logging
    fn name(&self) -> &str;
}

/// Frame source over already-decoded mono samples
pub struct PcmFrameSource {
    config: FrameSourceConfig,
    sample_rate: u32,
    samples: Option<Vec<i16>>,
    task: Option<JoinHandle<()>>,
}

impl PcmFrameSource {
    pub fn new(samples: Vec<i16>, sample_rate: u32, config: FrameSourceConfig) -> Self {
        Self {
            config,
            sample_rate,
            samples: Some(samples),
            task: None,
        }
    }

    /// Split samples into s16le frames of at most `frame_bytes`
    pub fn frames(samples: &[i16], sample_rate: u32, frame_bytes: usize) -> Vec<AudioFrame> {
        let samples_per_frame = (frame_bytes / SAMPLE_WIDTH).max(1);

        samples
            .chunks(samples_per_frame)
            .enumerate()
            .map(|(i, chunk)| AudioFrame {
                pcm: chunk.iter().flat_map(|s| s.to_le_bytes()).collect(),
                sample_rate,
                sequence: i as u64,
                timestamp_ms: (i * samples_per_frame) as u64 * 1000 / sample_rate.max(1) as u64,
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl AudioSource for PcmFrameSource {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>> {
        let samples = self
            .samples
            .take()
            .ok_or_else(|| anyhow::anyhow!("Frame source already started"))?;

        let frames = Self::frames(&samples, self.sample_rate, self.config.frame_bytes);
        let (tx, rx) = mpsc::channel(self.config.channel_capacity.max(1));

        info!(
            "Streaming {} frames ({} bytes each, {}Hz)",
            frames.len(),
            self.config.frame_bytes,
            self.sample_rate
        );

        self.task = Some(tokio::spawn(async move {
            for frame in frames {
                if tx.send(frame).await.is_err() {
                    debug!("Frame consumer went away, stopping source");
                    break;
                }
            }
        }));

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        Ok(())
    }

    fn is_streaming(&self) -> bool {
        self.task.as_ref().map(|t| !t.is_finished()).unwrap_or(false)
    }

    fn name(&self) -> &str {
        "pcm"
    }
}
