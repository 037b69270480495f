// Pitch - The fixed note range of the music box comb
// 21 chromatic teeth, C4 (middle C) up to G#5

use std::fmt;
use std::str::FromStr;

/// Number of teeth on the comb
pub const PITCH_COUNT: usize = 21;

/// Supported pitch names, lowest tooth first
const PITCH_NAMES: [&str; PITCH_COUNT] = [
    "C4", "C#4", "D4", "D#4", "E4", "F4", "F#4", "G4", "G#4", "A4", "A#4", "B4", "C5", "C#5",
    "D5", "D#5", "E5", "F5", "F#5", "G5", "G#5",
];

/// A note name outside the supported comb range
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pitch name: {0:?}")]
pub struct UnknownPitchError(pub String);

/// A pitch from the supported set, stored as a comb tooth index
///
/// Note data carries pitch names as strings so that unsupported names
/// survive deserialization; `Pitch` is the resolved, validated form the
/// scheduler and audio path work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch(u8);

impl Pitch {
    /// Resolve a pitch name like "C4" or "G#5"
    pub fn from_name(name: &str) -> Option<Self> {
        PITCH_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| Self(i as u8))
    }

    /// Pitch at the given comb tooth index (0 = C4)
    pub fn from_index(index: usize) -> Option<Self> {
        (index < PITCH_COUNT).then_some(Self(index as u8))
    }

    /// Comb tooth index (0-based)
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Pitch name (e.g. "C4", "A#4")
    pub fn name(self) -> &'static str {
        PITCH_NAMES[self.0 as usize]
    }

    /// MIDI note number (C4 = 60)
    pub fn midi_note(self) -> u8 {
        60 + self.0
    }

    /// All supported pitches, lowest first
    pub fn all() -> impl Iterator<Item = Pitch> {
        (0..PITCH_COUNT as u8).map(Pitch)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pitch {
    type Err = UnknownPitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownPitchError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_lookup() {
        let c4 = Pitch::from_name("C4").unwrap();
        assert_eq!(c4.index(), 0);
        assert_eq!(c4.midi_note(), 60);
        assert_eq!(c4.name(), "C4");

        let gs5 = Pitch::from_name("G#5").unwrap();
        assert_eq!(gs5.index(), PITCH_COUNT - 1);
        assert_eq!(gs5.midi_note(), 80);
    }

    #[test]
    fn test_unknown_pitch() {
        assert_eq!(Pitch::from_name("C3"), None);
        assert_eq!(Pitch::from_name("A5"), None);
        assert_eq!(Pitch::from_name("H2"), None);

        let err = "H2".parse::<Pitch>().unwrap_err();
        assert_eq!(err, UnknownPitchError("H2".to_string()));
        assert!(err.to_string().contains("H2"));
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Pitch::from_index(0), Pitch::from_name("C4"));
        assert_eq!(Pitch::from_index(20), Pitch::from_name("G#5"));
        assert_eq!(Pitch::from_index(21), None);
    }

    #[test]
    fn test_all_pitches_round_trip() {
        for pitch in Pitch::all() {
            assert_eq!(pitch.name().parse::<Pitch>().unwrap(), pitch);
        }
        assert_eq!(Pitch::all().count(), PITCH_COUNT);
    }
}
