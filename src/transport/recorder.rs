// Recorder - Captures live key presses as beat-stamped notes
// Onset-only capture: each press is stamped with its elapsed-beat offset
// and a fixed default sustain; key release is not measured

use super::clock::{Clock, SystemClock};
use crate::song::{DEFAULT_NOTE_DURATION, Note, Pitch, Song, SongOrigin};
use crate::timing::{Tempo, TimeSignature};
use std::time::Duration;

/// Recorder state machine: record_note is only valid while Recording
#[derive(Debug, Clone, Copy, PartialEq)]
enum RecorderState {
    Idle,
    Recording { started_at: Duration },
}

/// Live note-capture session
///
/// The recorder owns its timing context: the tempo supplied at
/// construction fixes how wall-clock deltas map to beats for the whole
/// capture. The capture buffer survives `stop_recording` so the host can
/// inspect it or build a `Song` from it; only the next `start_recording`
/// (or `clear`) discards it.
pub struct Recorder<C: Clock = SystemClock> {
    clock: C,
    tempo: Tempo,
    state: RecorderState,
    captured: Vec<Note>,
}

impl Recorder<SystemClock> {
    /// Create a recorder on real wall-clock time
    pub fn new(tempo: Tempo) -> Self {
        Self::with_clock(tempo, SystemClock::new())
    }
}

impl<C: Clock> Recorder<C> {
    /// Create a recorder on a custom clock (tests, offline hosts)
    pub fn with_clock(tempo: Tempo, clock: C) -> Self {
        Self {
            clock,
            tempo,
            state: RecorderState::Idle,
            captured: Vec::new(),
        }
    }

    /// Recording tempo (fixed for the recorder's lifetime)
    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    /// Begin a capture session at the current instant
    ///
    /// Starting while already recording restarts the capture; the
    /// previous unsaved buffer is discarded (last recording wins).
    pub fn start_recording(&mut self) {
        self.captured.clear();
        self.state = RecorderState::Recording {
            started_at: self.clock.now(),
        };
    }

    /// Capture one key press
    ///
    /// No-op when not recording. The note is stamped with the elapsed
    /// beat offset since the session started and the default sustain.
    pub fn record_note(&mut self, pitch: Pitch) {
        let RecorderState::Recording { started_at } = self.state else {
            return;
        };

        let elapsed_seconds = (self.clock.now() - started_at).as_secs_f64();
        let time = self.tempo.seconds_to_beats(elapsed_seconds);
        self.captured
            .push(Note::new(pitch.name(), time, DEFAULT_NOTE_DURATION));
    }

    /// End the capture session and return the captured notes
    ///
    /// The buffer stays in place for inspection until the next
    /// `start_recording`.
    pub fn stop_recording(&mut self) -> Vec<Note> {
        self.state = RecorderState::Idle;
        self.captured.clone()
    }

    /// The current capture buffer
    pub fn captured_notes(&self) -> &[Note] {
        &self.captured
    }

    /// Discard the capture buffer and reset to idle
    pub fn clear(&mut self) {
        self.captured.clear();
        self.state = RecorderState::Idle;
    }

    /// Build a `Song` from the last capture
    ///
    /// Does not clear the buffer; persisting the song is the caller's
    /// responsibility.
    pub fn create_song(&self, name: impl Into<String>, time_signature: TimeSignature) -> Song {
        Song {
            name: name.into(),
            tempo: self.tempo.bpm(),
            time_signature,
            notes: self.captured.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
            origin: SongOrigin::UserRecording,
        }
    }
}
