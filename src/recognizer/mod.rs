//! Incremental speech recognition sessions
//!
//! - `Recognizer` / `RecognizerProvider`: the injected engine capability
//! - `RecognizerSession`: frame-by-frame state machine over one engine instance
//! - `ScriptedRecognizer`: in-memory engine replaying canned utterances

mod engine;
mod scripted;
mod session;

pub use engine::{RecognizedWord, Recognizer, RecognizerProvider};
pub use scripted::{ScriptedProvider, ScriptedRecognizer, ScriptedStep, SessionLog};
pub use session::{FeedOutcome, RecognizerSession, SessionState};
