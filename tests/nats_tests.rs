use base64::Engine;
use subtitler::nats::messages::{AudioFrameMessage, OpenSessionMessage, RecognizerReply};

#[test]
fn test_open_session_serialization() {
    let msg = OpenSessionMessage {
        session_id: "subs-test".to_string(),
        sample_rate: 44100,
        model: "model".to_string(),
        speaker_model: Some("model-spk".to_string()),
        words: true,
    };

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"sample_rate\":44100"));
    assert!(json.contains("\"speaker_model\":\"model-spk\""));
    assert!(json.contains("\"words\":true"));
}

#[test]
fn test_audio_frame_serialization() {
    let pcm = [1u8, 0, 255, 127];
    let msg = AudioFrameMessage {
        session_id: "subs-test".to_string(),
        sequence: 3,
        pcm: base64::engine::general_purpose::STANDARD.encode(pcm),
        sample_rate: 16000,
        timestamp: "2025-10-27T14:30:00Z".to_string(),
    };

    let json = serde_json::to_string(&msg).unwrap();
    let deserialized: AudioFrameMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.sequence, 3);
    assert_eq!(
        base64::engine::general_purpose::STANDARD
            .decode(deserialized.pcm)
            .unwrap(),
        pcm
    );
}

#[test]
fn test_reply_with_words() {
    let json = r#"{
        "session_id": "subs-test",
        "final": true,
        "result": [
            {"conf": 1.0, "end": 1.11, "start": 0.87, "word": "what"},
            {"conf": 0.9, "end": 1.53, "start": 1.11, "word": "zero"}
        ],
        "text": "what zero"
    }"#;

    let reply: RecognizerReply = serde_json::from_str(json).unwrap();
    assert!(reply.finalized);
    assert_eq!(reply.result.len(), 2);
    assert_eq!(reply.result[1].to_timed_word().end_ms, 1530);
    assert!(reply.error.is_none());
}

#[test]
fn test_reply_partial_defaults() {
    let reply: RecognizerReply = serde_json::from_str(r#"{"session_id": "s"}"#).unwrap();
    assert!(!reply.finalized);
    assert!(reply.result.is_empty());
}

#[test]
fn test_reply_without_session_id() {
    let reply: RecognizerReply =
        serde_json::from_str(r#"{"final": true, "result": [], "text": ""}"#).unwrap();
    assert!(reply.session_id.is_empty());
    assert!(reply.finalized);
    assert!(reply.result.is_empty());
    assert!(reply.error.is_none());
}

#[test]
fn test_reply_error() {
    let reply: RecognizerReply =
        serde_json::from_str(r#"{"session_id": "s", "error": "model not loaded"}"#).unwrap();
    assert_eq!(reply.error.as_deref(), Some("model not loaded"));
}
