pub mod client;
pub mod messages;

pub use client::{NatsRecognizer, NatsRecognizerProvider};
pub use messages::{AudioFrameMessage, OpenSessionMessage, RecognizerReply};
