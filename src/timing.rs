// Timing - Musical time representation
// Handles conversion between beats and seconds at a given tempo

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Lowest tempo the UI offers (BPM). Clamping to this range is a UI
/// concern; the core only rejects tempos that make conversion meaningless.
pub const MIN_TEMPO: f64 = 40.0;

/// Highest tempo the UI offers (BPM).
pub const MAX_TEMPO: f64 = 200.0;

/// Default tempo for new recordings (BPM).
pub const DEFAULT_TEMPO: f64 = 100.0;

/// Timing errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimingError {
    #[error("invalid tempo: {0} BPM (must be finite and > 0)")]
    InvalidTempo(f64),

    #[error("invalid time signature: {0:?} (expected \"N/D\")")]
    InvalidTimeSignature(String),
}

/// Tempo in BPM (Beats Per Minute)
///
/// Construction validates the value: a tempo that is zero, negative, or
/// non-finite cannot be converted to a beat length and is rejected rather
/// than clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    bpm: f64,
}

impl Tempo {
    /// Creates a new tempo
    pub fn new(bpm: f64) -> Result<Self, TimingError> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(TimingError::InvalidTempo(bpm));
        }
        Ok(Self { bpm })
    }

    /// Get BPM value
    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Duration of one beat in seconds
    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / self.bpm
    }

    /// Convert a beat offset to seconds
    pub fn beats_to_seconds(&self, beats: f64) -> f64 {
        beats * self.seconds_per_beat()
    }

    /// Convert a wall-clock duration in seconds to a beat offset
    pub fn seconds_to_beats(&self, seconds: f64) -> f64 {
        seconds / self.seconds_per_beat()
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self { bpm: DEFAULT_TEMPO }
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} BPM", self.bpm)
    }
}

/// Time signature (numerator/denominator)
///
/// Serialized as an "N/D" string ("4/4", "3/4", ...) to match the song
/// wire format. Only the numerator (beats per measure) affects playback;
/// the denominator is carried for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    pub numerator: u8,   // Beats per measure
    pub denominator: u8, // Note value (4 = quarter note)
}

impl TimeSignature {
    /// Creates a new time signature
    pub fn new(numerator: u8, denominator: u8) -> Self {
        assert!(numerator > 0, "Time signature numerator must be > 0");
        assert!(
            denominator.is_power_of_two(),
            "Time signature denominator must be power of 2"
        );
        Self {
            numerator,
            denominator,
        }
    }

    /// Common 4/4 time signature
    pub fn four_four() -> Self {
        Self::new(4, 4)
    }

    /// Common 3/4 time signature (waltz)
    pub fn three_four() -> Self {
        Self::new(3, 4)
    }

    /// Common 2/4 time signature (march)
    pub fn two_four() -> Self {
        Self::new(2, 4)
    }

    /// Number of beats per measure
    pub fn beats_per_measure(&self) -> u64 {
        self.numerator as u64
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::four_four()
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for TimeSignature {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimingError::InvalidTimeSignature(s.to_string());

        let (num, den) = s.split_once('/').ok_or_else(invalid)?;
        let numerator: u8 = num.trim().parse().map_err(|_| invalid())?;
        let denominator: u8 = den.trim().parse().map_err(|_| invalid())?;

        if numerator == 0 || !denominator.is_power_of_two() {
            return Err(invalid());
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }
}

impl Serialize for TimeSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
