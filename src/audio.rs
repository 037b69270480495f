// Audio boundary - readiness wrapper around an external tone backend
// Synthesis lives outside this crate; the engine only tracks whether the
// backend is initialized and routes note triggers to it

use crate::song::Pitch;

/// Audio error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AudioError {
    #[error("audio backend failed to initialize: {0}")]
    InitFailure(String),
}

/// The external synthesis backend
///
/// `init` is allowed to fail (a browser backend, for example, cannot
/// start before a user gesture) and to be retried later.
pub trait ToneBackend {
    fn init(&mut self) -> Result<(), AudioError>;

    /// Sound a pitch for `duration` seconds of sustain
    fn trigger(&mut self, pitch: Pitch, duration: f64);
}

/// Backend wrapper with lazy initialization
///
/// `play_note` initializes the backend on first use. A failed init
/// leaves the output not-ready; every later call retries cleanly.
pub struct AudioOutput<B: ToneBackend> {
    backend: B,
    ready: bool,
}

impl<B: ToneBackend> AudioOutput<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            ready: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Initialize the backend; no-op once ready
    pub fn init(&mut self) -> Result<(), AudioError> {
        if self.ready {
            return Ok(());
        }
        self.backend.init()?;
        self.ready = true;
        Ok(())
    }

    /// Sound a single pitch, initializing the backend first if needed
    pub fn play_note(&mut self, pitch: Pitch, duration: f64) -> Result<(), AudioError> {
        self.init()?;
        self.backend.trigger(pitch, duration);
        Ok(())
    }
}
