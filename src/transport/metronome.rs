// Metronome - Steady click synchronized to a tempo and time signature
// Accents the first beat of each measure; runs independently of playback
// and recording sessions

use super::clock::{Clock, SystemClock};
use crate::timing::{Tempo, TimeSignature, TimingError};
use std::time::Duration;

/// Metronome click type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickType {
    /// Click on the first beat of a measure (downbeat)
    Accent,
    /// Click on other beats
    Regular,
}

/// One running click track
struct ClickSession {
    started_at: Duration,
    seconds_per_beat: f64,
    beats_per_measure: u64,
    /// Beat index of the next click to fire (0 = downbeat of measure 1)
    next_beat: u64,
    on_click: Box<dyn FnMut(ClickType)>,
}

/// Poll-driven metronome
///
/// `start` arms a repeating click; due clicks fire from `tick()`. The
/// first click (beat 0) fires on the first tick after starting. Starting
/// again replaces the running click track and resets the beat counter.
pub struct Metronome<C: Clock = SystemClock> {
    clock: C,
    session: Option<ClickSession>,
}

impl Metronome<SystemClock> {
    /// Create a metronome on real wall-clock time
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for Metronome<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Metronome<C> {
    /// Create a metronome on a custom clock (tests, offline hosts)
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            session: None,
        }
    }

    /// Start clicking at `tempo_bpm`
    ///
    /// Only the numerator of the time signature matters: beat indices
    /// `0, N, 2N, ...` are accented. An already-running metronome is
    /// implicitly stopped first.
    pub fn start(
        &mut self,
        tempo_bpm: f64,
        time_signature: TimeSignature,
        on_click: impl FnMut(ClickType) + 'static,
    ) -> Result<(), TimingError> {
        let tempo = Tempo::new(tempo_bpm)?;

        self.session = Some(ClickSession {
            started_at: self.clock.now(),
            seconds_per_beat: tempo.seconds_per_beat(),
            beats_per_measure: time_signature.beats_per_measure(),
            next_beat: 0,
            on_click: Box::new(on_click),
        });

        Ok(())
    }

    /// Cancel the click track; idempotent
    pub fn stop(&mut self) {
        self.session = None;
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Fire every click that has come due since the last call
    pub fn tick(&mut self) {
        let now = self.clock.now();
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let elapsed = (now - session.started_at).as_secs_f64();
        while session.next_beat as f64 * session.seconds_per_beat <= elapsed {
            let click = if session.next_beat % session.beats_per_measure == 0 {
                ClickType::Accent
            } else {
                ClickType::Regular
            };
            session.next_beat += 1;
            (session.on_click)(click);
        }
    }
}
