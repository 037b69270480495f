// Music Box Engine - timing core for a virtual comb-and-drum instrument
//
// The surrounding UI owns rendering and input mapping; this crate owns
// everything temporal: scheduling a song's note onsets against a tempo
// (with pause/resume/loop), capturing live key presses as beat-stamped
// recordings, the metronome click track, and persistence of recordings.
//
// The engine is single-threaded and poll-driven: hosts call `tick()` on
// the Scheduler and Metronome from their event loop and poll
// `current_time()` (about 20 Hz) for animation. A manually triggered note
// is routed by the host to both `AudioOutput::play_note` and, while a
// recording is active, `Recorder::record_note`.

pub mod audio;
pub mod messaging;
pub mod song;
pub mod storage;
pub mod timing;
pub mod transport;

// Re-export commonly used types for convenience
pub use audio::{AudioError, AudioOutput, ToneBackend};
pub use messaging::{
    Notification, NotificationCategory, NotificationLevel, create_notification_channel,
};
pub use song::builtin::builtin_songs;
pub use song::{DEFAULT_NOTE_DURATION, Note, PITCH_COUNT, Pitch, Song, SongOrigin, UnknownPitchError};
pub use storage::{RecordingStore, StorageError};
pub use timing::{DEFAULT_TEMPO, MAX_TEMPO, MIN_TEMPO, Tempo, TimeSignature, TimingError};
pub use transport::{ClickType, Clock, ManualClock, Metronome, Recorder, Scheduler, SystemClock};
