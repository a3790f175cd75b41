// Integration tests for audio decoding and framing
//
// Fixtures are synthesized with hound into a temporary directory.

use anyhow::Result;
use std::path::{Path, PathBuf};
use subtitler::audio::{AudioFile, AudioSource, FrameSourceConfig, PcmFrameSource};
use tempfile::TempDir;

fn write_wav_i16(path: &Path, sample_rate: u32, channels: u16, samples: &[i16]) -> Result<()> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    Ok(())
}

fn write_wav_f32(path: &Path, sample_rate: u32, channels: u16, samples: &[f32]) -> Result<()> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    Ok(())
}

fn fixture(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[test]
fn test_audio_file_open_mono() -> Result<()> {
    let dir = TempDir::new()?;
    let path = fixture(&dir, "mono.wav");
    let samples: Vec<i16> = (0..16000).map(|i| (i % 200) as i16).collect();
    write_wav_i16(&path, 16000, 1, &samples)?;

    let audio = AudioFile::open(&path)?;

    assert_eq!(audio.sample_rate, 16000);
    assert_eq!(audio.channels, 1);
    assert_eq!(audio.samples, samples);
    assert!((audio.duration_seconds - 1.0).abs() < 1e-9);
    assert!(audio.path.contains("mono.wav"));

    Ok(())
}

#[test]
fn test_audio_file_stereo_to_mono() -> Result<()> {
    let dir = TempDir::new()?;
    let path = fixture(&dir, "stereo.wav");
    // L, R interleaved
    write_wav_i16(&path, 44100, 2, &[100, 300, -100, -300, 0, 10])?;

    let audio = AudioFile::open(&path)?;
    assert_eq!(audio.channels, 2);
    assert_eq!(audio.samples.len() % audio.channels as usize, 0);

    let mono = audio.to_mono();
    assert_eq!(mono, vec![200, -200, 5]);
    assert_eq!(audio.sample_rate, 44100, "sample rate is kept");

    Ok(())
}

#[test]
fn test_audio_file_float_wav_goes_through_symphonia() -> Result<()> {
    let dir = TempDir::new()?;
    let path = fixture(&dir, "float.wav");
    write_wav_f32(&path, 8000, 1, &[0.0f32, 0.5, -0.5, 0.25].repeat(2000))?;

    let audio = AudioFile::open(&path)?;

    assert_eq!(audio.sample_rate, 8000);
    assert_eq!(audio.channels, 1);
    assert_eq!(audio.samples.len(), 8000);
    assert_eq!(audio.samples[0], 0);
    assert!(audio.samples[1] > 16000, "0.5 should map near i16::MAX / 2");
    assert!(audio.samples[2] < -16000);

    Ok(())
}

#[test]
fn test_audio_file_nonexistent() {
    let path = PathBuf::from("/nonexistent/path/to/audio.wav");
    let result = AudioFile::open(&path);

    assert!(result.is_err(), "Opening nonexistent file should fail");
}

#[test]
fn test_audio_file_garbage() -> Result<()> {
    let dir = TempDir::new()?;
    let path = fixture(&dir, "garbage.mp3");
    std::fs::write(&path, b"definitely not audio")?;

    assert!(AudioFile::open(&path).is_err());

    Ok(())
}

#[test]
fn test_frames_split_and_encode_le() {
    let samples: Vec<i16> = vec![1, -2, 0x1234, 4, 5];
    let frames = PcmFrameSource::frames(&samples, 16000, 4);

    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].pcm, vec![1, 0, 0xfe, 0xff]);
    assert_eq!(frames[1].pcm, vec![0x34, 0x12, 4, 0]);
    assert_eq!(frames[2].pcm, vec![5, 0]);
    assert_eq!(frames[2].sample_count(), 1);
    assert_eq!(
        frames.iter().map(|f| f.sequence).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn test_frame_timestamps() {
    let samples = vec![0i16; 16000];
    let frames = PcmFrameSource::frames(&samples, 16000, 8000);

    assert_eq!(frames.len(), 4);
    assert_eq!(frames[1].timestamp_ms, 250);
    assert_eq!(frames[3].timestamp_ms, 750);
}

#[tokio::test]
async fn test_frame_source_streams_in_order() -> Result<()> {
    let samples: Vec<i16> = (0..10_000).map(|i| i as i16).collect();
    let mut source = PcmFrameSource::new(
        samples,
        16000,
        FrameSourceConfig {
            frame_bytes: 2000,
            channel_capacity: 2,
        },
    );

    let mut rx = source.start().await?;
    let mut sequences = Vec::new();
    let mut total_bytes = 0;
    while let Some(frame) = rx.recv().await {
        sequences.push(frame.sequence);
        total_bytes += frame.pcm.len();
    }

    assert_eq!(sequences, (0..10).collect::<Vec<u64>>());
    assert_eq!(total_bytes, 20_000);
    assert!(source.start().await.is_err(), "a source streams once");
    source.stop().await?;

    Ok(())
}

#[tokio::test]
async fn test_frame_source_stop_closes_stream() -> Result<()> {
    let mut source = PcmFrameSource::new(
        vec![0i16; 100_000],
        16000,
        FrameSourceConfig {
            frame_bytes: 2,
            channel_capacity: 1,
        },
    );

    let mut rx = source.start().await?;
    assert!(rx.recv().await.is_some());
    source.stop().await?;

    let mut remaining = 0;
    while rx.recv().await.is_some() {
        remaining += 1;
    }
    assert!(remaining <= 2, "source kept streaming after stop: {}", remaining);
    assert!(!source.is_streaming());

    Ok(())
}
