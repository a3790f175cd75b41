use anyhow::{Context, Result};
use async_nats::Client;
use base64::Engine;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::messages::{AudioFrameMessage, OpenSessionMessage, RecognizerReply};
use crate::config::RecognizerConfig;
use crate::recognizer::{RecognizedWord, Recognizer, RecognizerProvider};

/// Speech service reached over NATS request/reply.
///
/// The service owns the acoustic (and optional speaker) model; this process
/// connects once and opens one remote decoder per request.
pub struct NatsRecognizerProvider {
    client: Client,
    model: String,
    speaker_model: Option<String>,
}

impl NatsRecognizerProvider {
    /// Connect to NATS server
    pub async fn connect(config: &RecognizerConfig) -> Result<Self> {
        info!("Connecting to NATS at {}", config.nats_url);

        let client = async_nats::connect(config.nats_url.as_str())
            .await
            .context("Failed to connect to NATS")?;

        info!(
            "Connected to NATS successfully (model={}, speaker_model={:?})",
            config.model, config.speaker_model
        );

        Ok(Self {
            client,
            model: config.model.clone(),
            speaker_model: config.speaker_model.clone(),
        })
    }
}

#[async_trait::async_trait]
impl RecognizerProvider for NatsRecognizerProvider {
    async fn open_session(&self, sample_rate: u32) -> Result<Box<dyn Recognizer>> {
        let session_id = format!("subs-{}", uuid::Uuid::new_v4());

        let message = OpenSessionMessage {
            session_id: session_id.clone(),
            sample_rate,
            model: self.model.clone(),
            speaker_model: self.speaker_model.clone(),
            words: true,
        };
        request(&self.client, "stt.session.open".to_string(), &message)
            .await
            .context("Failed to open recognizer session")?;

        info!("Opened remote recognizer {} at {}Hz", session_id, sample_rate);

        Ok(Box::new(NatsRecognizer {
            client: self.client.clone(),
            session_id,
            sample_rate,
            sequence: 0,
        }))
    }

    fn name(&self) -> &str {
        "nats"
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Closing NATS connection");
        self.client
            .flush()
            .await
            .context("Failed to flush NATS connection")?;
        Ok(())
    }
}

/// One remote decoder instance
pub struct NatsRecognizer {
    client: Client,
    session_id: String,
    sample_rate: u32,
    sequence: u64,
}

impl NatsRecognizer {
    fn subject(&self, verb: &str) -> String {
        format!("stt.session.{}.{}", self.session_id, verb)
    }
}

#[async_trait::async_trait]
impl Recognizer for NatsRecognizer {
    async fn accept_waveform(&mut self, samples: &[i16]) -> Result<Option<Vec<RecognizedWord>>> {
        let pcm_bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

        let message = AudioFrameMessage {
            session_id: self.session_id.clone(),
            sequence: self.sequence,
            pcm: base64::engine::general_purpose::STANDARD.encode(&pcm_bytes),
            sample_rate: self.sample_rate,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let reply = request(&self.client, self.subject("accept"), &message)
            .await
            .with_context(|| format!("Failed to send audio frame {}", self.sequence))?;

        debug!(
            "Sent frame {} to {} (bytes={}, final={})",
            self.sequence,
            self.session_id,
            pcm_bytes.len(),
            reply.finalized
        );
        self.sequence += 1;

        Ok(reply.finalized.then_some(reply.result))
    }

    async fn final_result(&mut self) -> Result<Vec<RecognizedWord>> {
        let reply = request(&self.client, self.subject("final"), &self.session_id)
            .await
            .context("Failed to fetch final result")?;
        Ok(reply.result)
    }

    async fn free(&mut self) -> Result<()> {
        request(&self.client, self.subject("free"), &self.session_id)
            .await
            .context("Failed to free recognizer session")?;
        Ok(())
    }

    fn abandon(&mut self) {
        let client = self.client.clone();
        let subject = self.subject("free");
        let payload = self.session_id.clone().into_bytes();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = client.publish(subject, payload.into()).await {
                        warn!("Failed to release abandoned recognizer: {}", e);
                    }
                });
            }
            Err(_) => warn!("No runtime to release recognizer {}", self.session_id),
        }
    }
}

async fn request<T: Serialize>(client: &Client, subject: String, body: &T) -> Result<RecognizerReply> {
    let payload = serde_json::to_vec(body)?;

    let msg = client
        .request(subject.clone(), payload.into())
        .await
        .with_context(|| format!("No reply on {}", subject))?;

    let reply: RecognizerReply = serde_json::from_slice(&msg.payload)
        .with_context(|| format!("Malformed reply on {}", subject))?;

    if let Some(error) = &reply.error {
        anyhow::bail!("Speech service error on {}: {}", subject, error);
    }

    Ok(reply)
}
