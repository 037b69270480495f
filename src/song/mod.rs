// Song data model - notes, songs, and the built-in library
// This is the wire format shared by the scheduler, recorder, and storage

pub mod builtin;
pub mod pitch;

pub use pitch::{PITCH_COUNT, Pitch, UnknownPitchError};

use crate::timing::{DEFAULT_TEMPO, TimeSignature};
use serde::{Deserialize, Serialize};

/// Sustain length applied to recorded notes (seconds)
///
/// Recording captures onsets only; every captured note gets this fixed
/// pluck-style duration regardless of how long the key was held.
pub const DEFAULT_NOTE_DURATION: f64 = 0.5;

/// A single timed note event
///
/// `time` is in beats from the start of the song; `duration` is wall-clock
/// seconds of sustain, independent of tempo. The pitch stays a string here:
/// unsupported names are kept through deserialization and skipped per-note
/// at scheduling time instead of failing the whole song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub pitch: String,
    pub time: f64,
    #[serde(default = "default_duration")]
    pub duration: f64,
}

fn default_duration() -> f64 {
    DEFAULT_NOTE_DURATION
}

impl Note {
    /// Creates a new note
    pub fn new(pitch: impl Into<String>, time: f64, duration: f64) -> Self {
        assert!(time >= 0.0, "Note time must be >= 0");
        assert!(duration > 0.0, "Note duration must be > 0");
        Self {
            pitch: pitch.into(),
            time,
            duration,
        }
    }
}

/// Where a song came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SongOrigin {
    BuiltIn,
    UserRecording,
}

impl Default for SongOrigin {
    fn default() -> Self {
        SongOrigin::UserRecording
    }
}

/// A song: a named, tempo-tagged set of timed note events
///
/// Notes are treated as an unordered multiset; they need not be sorted by
/// time and duplicate (pitch, time) pairs are allowed (chords, repeats).
/// Serialized with camelCase keys to match the recordings file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub name: String,
    #[serde(default = "default_tempo")]
    pub tempo: f64,
    #[serde(default)]
    pub time_signature: TimeSignature,
    pub notes: Vec<Note>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub origin: SongOrigin,
}

fn default_tempo() -> f64 {
    DEFAULT_TEMPO
}

impl Song {
    /// Highest beat offset in the song (0.0 if empty)
    pub fn max_beat(&self) -> f64 {
        self.notes.iter().fold(0.0, |max, n| max.max(n.time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_defaults_duration_on_deserialize() {
        let note: Note = serde_json::from_str(r#"{"pitch":"C4","time":1.5}"#).unwrap();
        assert_eq!(note.pitch, "C4");
        assert_eq!(note.time, 1.5);
        assert_eq!(note.duration, DEFAULT_NOTE_DURATION);
    }

    #[test]
    #[should_panic(expected = "Note duration must be > 0")]
    fn test_zero_duration_rejected() {
        Note::new("C4", 0.0, 0.0);
    }

    #[test]
    fn test_song_serde_round_trip() {
        let song = Song {
            name: "Test".to_string(),
            tempo: 90.0,
            time_signature: TimeSignature::three_four(),
            notes: vec![Note::new("C4", 0.0, 0.5), Note::new("E4", 1.0, 0.5)],
            created_at: "2024-12-01T12:00:00Z".to_string(),
            origin: SongOrigin::UserRecording,
        };

        let json = serde_json::to_string(&song).unwrap();
        assert!(json.contains("\"timeSignature\":\"3/4\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"user-recording\""));

        let back: Song = serde_json::from_str(&json).unwrap();
        assert_eq!(back, song);
    }

    #[test]
    fn test_song_minimal_deserialize() {
        // Imports only require a name and a notes array
        let song: Song = serde_json::from_str(r#"{"name":"A","notes":[]}"#).unwrap();
        assert_eq!(song.name, "A");
        assert_eq!(song.tempo, DEFAULT_TEMPO);
        assert_eq!(song.time_signature, TimeSignature::four_four());
        assert!(song.notes.is_empty());
        assert_eq!(song.origin, SongOrigin::UserRecording);
    }

    #[test]
    fn test_max_beat() {
        let mut song: Song = serde_json::from_str(r#"{"name":"A","notes":[]}"#).unwrap();
        assert_eq!(song.max_beat(), 0.0);

        // Unsorted on purpose; max_beat does not assume ordering
        song.notes = vec![
            Note::new("C4", 3.0, 0.5),
            Note::new("D4", 0.5, 0.5),
            Note::new("E4", 2.0, 0.5),
        ];
        assert_eq!(song.max_beat(), 3.0);
    }
}
