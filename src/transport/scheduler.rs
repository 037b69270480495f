// Scheduler - Arms and fires note-onset callbacks for a song
// Converts beat-relative note times to wall-clock offsets at a tempo and
// drives them with pause/resume/loop/stop semantics

use super::clock::{Clock, SystemClock};
use crate::messaging::{Notification, NotificationCategory, NotificationProducer};
use crate::song::{Note, Pitch};
use crate::timing::{Tempo, TimingError};
use ringbuf::traits::Producer;
use std::time::Duration;

/// One armed onset, already resolved to a supported pitch
#[derive(Debug, Clone, Copy)]
struct ScheduledNote {
    offset_seconds: f64,
    pitch: Pitch,
}

/// Ephemeral state of one scheduled playback
///
/// Owned by the Scheduler; created by `schedule_song` and destroyed by
/// `stop` or natural completion. Pause freezes the elapsed position
/// without tearing the session down.
struct PlaybackSession {
    /// Onsets sorted by offset; ties keep their note-list order
    events: Vec<ScheduledNote>,
    /// Wall-clock length of one cycle: (max beat + 1) beats at the tempo
    cycle_seconds: f64,
    looping: bool,
    /// Completed cycle count (always 0 when not looping)
    cycle: u64,
    /// Next event to fire within the current cycle
    next_event: usize,
    /// Seconds accumulated before the last resume
    elapsed_base: f64,
    /// Clock reading at the last start/resume
    resumed_at: Duration,
    paused: bool,
    on_note: Box<dyn FnMut(Pitch)>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl PlaybackSession {
    fn elapsed(&self, now: Duration) -> f64 {
        if self.paused {
            self.elapsed_base
        } else {
            self.elapsed_base + (now - self.resumed_at).as_secs_f64()
        }
    }
}

/// Playback scheduler
///
/// Poll-driven: after `schedule_song` arms a session, the host calls
/// `tick()` from its event loop (about 20 Hz is plenty) and due onsets
/// fire from inside that call. Nothing blocks and no callback can fire
/// outside `tick()`, so a session that was stopped stays silent.
///
/// At most one session is active; scheduling again replaces it.
pub struct Scheduler<C: Clock = SystemClock> {
    clock: C,
    session: Option<PlaybackSession>,
    notifications: Option<NotificationProducer>,
}

impl Scheduler<SystemClock> {
    /// Create a scheduler on real wall-clock time
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for Scheduler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Scheduler<C> {
    /// Create a scheduler on a custom clock (tests, offline hosts)
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            session: None,
            notifications: None,
        }
    }

    /// Attach a sink for non-fatal diagnostics (unknown pitches etc.)
    pub fn set_notification_sink(&mut self, sink: NotificationProducer) {
        self.notifications = Some(sink);
    }

    /// Arm a playback session for `notes` at `tempo_bpm`
    ///
    /// Every note's beat time is converted to a wall-clock offset. Notes
    /// with unsupported pitch names are skipped with a warning; they never
    /// abort the rest of the song, but they still count toward the song
    /// length. An empty note list completes immediately.
    ///
    /// A previously active session is stopped first. On error (invalid
    /// tempo) nothing is armed and any previous session keeps running.
    pub fn schedule_song(
        &mut self,
        notes: &[Note],
        tempo_bpm: f64,
        looping: bool,
        on_note: impl FnMut(Pitch) + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> Result<(), TimingError> {
        let tempo = Tempo::new(tempo_bpm)?;

        self.stop();

        if notes.is_empty() {
            on_complete();
            return Ok(());
        }

        // One trailing beat after the last onset before the song ends or
        // the loop wraps around
        let max_beat = notes.iter().fold(0.0_f64, |max, n| max.max(n.time));
        let cycle_seconds = tempo.beats_to_seconds(max_beat + 1.0);

        let mut events = Vec::with_capacity(notes.len());
        for note in notes {
            match Pitch::from_name(&note.pitch) {
                Some(pitch) => events.push(ScheduledNote {
                    offset_seconds: tempo.beats_to_seconds(note.time),
                    pitch,
                }),
                None => self.warn_unknown_pitch(&note.pitch),
            }
        }

        // Stable sort: equal onset times fire in note-list order
        events.sort_by(|a, b| a.offset_seconds.total_cmp(&b.offset_seconds));

        self.session = Some(PlaybackSession {
            events,
            cycle_seconds,
            looping,
            cycle: 0,
            next_event: 0,
            elapsed_base: 0.0,
            resumed_at: self.clock.now(),
            paused: false,
            on_note: Box::new(on_note),
            on_complete: Some(Box::new(on_complete)),
        });

        Ok(())
    }

    /// Fire every onset that has come due since the last call
    ///
    /// Onsets fire in non-decreasing absolute time even when the host
    /// ticks slowly enough for several loop cycles to elapse at once.
    pub fn tick(&mut self) {
        let now = self.clock.now();

        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.paused {
            return;
        }

        let elapsed = session.elapsed(now);
        let mut completed = false;

        loop {
            if let Some(event) = session.events.get(session.next_event) {
                let due = session.cycle as f64 * session.cycle_seconds + event.offset_seconds;
                if due <= elapsed {
                    let pitch = event.pitch;
                    session.next_event += 1;
                    (session.on_note)(pitch);
                    continue;
                }
            }

            let cycle_end = (session.cycle + 1) as f64 * session.cycle_seconds;
            if elapsed >= cycle_end {
                if session.looping {
                    session.cycle += 1;
                    session.next_event = 0;
                    continue;
                }
                completed = true;
            }

            break;
        }

        // Natural completion: tear the session down first, then notify
        if completed
            && let Some(mut finished) = self.session.take()
            && let Some(on_complete) = finished.on_complete.take()
        {
            on_complete();
        }
    }

    /// Freeze the elapsed position without discarding the session
    ///
    /// No-op when nothing is playing or already paused.
    pub fn pause(&mut self) {
        let now = self.clock.now();
        if let Some(session) = self.session.as_mut()
            && !session.paused
        {
            session.elapsed_base = session.elapsed(now);
            session.paused = true;
        }
    }

    /// Continue from the paused position
    ///
    /// Remaining onsets keep their relative offsets; the paused interval
    /// never counts as elapsed time. No-op if not paused.
    pub fn resume(&mut self) {
        let now = self.clock.now();
        if let Some(session) = self.session.as_mut()
            && session.paused
        {
            session.resumed_at = now;
            session.paused = false;
        }
    }

    /// Cancel the current session and reset the elapsed position to zero
    ///
    /// Idempotent. No callback belonging to the cancelled session can fire
    /// after this returns.
    pub fn stop(&mut self) {
        self.session = None;
    }

    /// Elapsed playback seconds, excluding paused intervals
    ///
    /// Zero when no session is active. Hosts poll this to drive scroll
    /// and animation position.
    pub fn current_time(&self) -> f64 {
        match &self.session {
            Some(session) => session.elapsed(self.clock.now()),
            None => 0.0,
        }
    }

    /// True while a session is active and not paused
    pub fn is_playing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.paused)
    }

    fn warn_unknown_pitch(&mut self, name: &str) {
        eprintln!("Unknown pitch '{}' skipped during scheduling", name);
        if let Some(sink) = self.notifications.as_mut() {
            let _ = sink.try_push(Notification::warning(
                NotificationCategory::Playback,
                format!("Unknown pitch '{}' skipped", name),
            ));
        }
    }
}
