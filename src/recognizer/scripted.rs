use anyhow::Result;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::engine::{RecognizedWord, Recognizer, RecognizerProvider};

/// What the scripted engine answers to the next frame
#[derive(Debug, Clone)]
pub enum ScriptedStep {
    Continue,
    Finalize(Vec<RecognizedWord>),
    Fail(String),
}

/// Lifecycle calls observed across all sessions of a provider
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionLog {
    pub opened: usize,
    pub frames: usize,
    pub samples: usize,
    pub final_results: usize,
    pub freed: usize,
    pub abandoned: usize,
}

/// Provider handing out engines that replay a fixed script
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    steps: Vec<ScriptedStep>,
    final_words: Vec<RecognizedWord>,
    log: Arc<Mutex<SessionLog>>,
}

impl ScriptedProvider {
    pub fn new(steps: Vec<ScriptedStep>, final_words: Vec<RecognizedWord>) -> Self {
        Self {
            steps,
            final_words,
            log: Arc::new(Mutex::new(SessionLog::default())),
        }
    }

    pub fn log(&self) -> SessionLog {
        self.log.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl RecognizerProvider for ScriptedProvider {
    async fn open_session(&self, _sample_rate: u32) -> Result<Box<dyn Recognizer>> {
        record(&self.log, |l| l.opened += 1);
        Ok(Box::new(ScriptedRecognizer {
            steps: self.steps.iter().cloned().collect(),
            final_words: Some(self.final_words.clone()),
            log: Arc::clone(&self.log),
        }))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Engine replaying one step per accepted frame, then `Continue`
pub struct ScriptedRecognizer {
    steps: VecDeque<ScriptedStep>,
    final_words: Option<Vec<RecognizedWord>>,
    log: Arc<Mutex<SessionLog>>,
}

#[async_trait::async_trait]
impl Recognizer for ScriptedRecognizer {
    async fn accept_waveform(&mut self, samples: &[i16]) -> Result<Option<Vec<RecognizedWord>>> {
        record(&self.log, |l| {
            l.frames += 1;
            l.samples += samples.len();
        });

        match self.steps.pop_front().unwrap_or(ScriptedStep::Continue) {
            ScriptedStep::Continue => Ok(None),
            ScriptedStep::Finalize(words) => Ok(Some(words)),
            ScriptedStep::Fail(msg) => anyhow::bail!(msg),
        }
    }

    async fn final_result(&mut self) -> Result<Vec<RecognizedWord>> {
        record(&self.log, |l| l.final_results += 1);
        Ok(self.final_words.take().unwrap_or_default())
    }

    async fn free(&mut self) -> Result<()> {
        record(&self.log, |l| l.freed += 1);
        Ok(())
    }

    fn abandon(&mut self) {
        record(&self.log, |l| l.abandoned += 1);
    }
}

fn record(log: &Mutex<SessionLog>, f: impl FnOnce(&mut SessionLog)) {
    if let Ok(mut log) = log.lock() {
        f(&mut log);
    }
}
