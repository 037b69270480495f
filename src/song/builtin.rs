// Built-in song library
// Pre-loaded Christmas songs shipped with the music box

use super::{Note, Song, SongOrigin};
use crate::timing::TimeSignature;

fn n(pitch: &str, time: f64, duration: f64) -> Note {
    Note::new(pitch, time, duration)
}

fn song(name: &str, tempo: f64, time_signature: TimeSignature, notes: Vec<Note>) -> Song {
    Song {
        name: name.to_string(),
        tempo,
        time_signature,
        notes,
        created_at: String::new(),
        origin: SongOrigin::BuiltIn,
    }
}

/// The built-in songs, in menu order
pub fn builtin_songs() -> Vec<Song> {
    vec![silent_night(), jingle_bells(), we_wish_you_a_merry_christmas()]
}

fn silent_night() -> Song {
    song(
        "Silent Night",
        80.0,
        TimeSignature::three_four(),
        vec![
            // Si-lent night
            n("G4", 0.0, 0.75),
            n("A4", 0.75, 0.25),
            n("G4", 1.0, 0.5),
            n("E4", 1.5, 1.5),
            // Ho-ly night
            n("G4", 3.0, 0.75),
            n("A4", 3.75, 0.25),
            n("G4", 4.0, 0.5),
            n("E4", 4.5, 1.5),
            // All is calm
            n("D5", 6.0, 1.0),
            n("D5", 7.0, 0.5),
            n("B4", 7.5, 1.5),
            // All is bright
            n("C5", 9.0, 1.0),
            n("C5", 10.0, 0.5),
            n("G4", 10.5, 1.5),
            // Round yon virgin
            n("A4", 12.0, 1.0),
            n("A4", 13.0, 0.5),
            n("C5", 13.5, 0.5),
            n("B4", 14.0, 0.5),
            n("A4", 14.5, 0.5),
            // Mother and child
            n("G4", 15.0, 0.75),
            n("A4", 15.75, 0.25),
            n("G4", 16.0, 0.5),
            n("E4", 16.5, 1.5),
            // Holy infant
            n("A4", 18.0, 1.0),
            n("A4", 19.0, 0.5),
            n("C5", 19.5, 0.5),
            n("B4", 20.0, 0.5),
            n("A4", 20.5, 0.5),
            // So tender and mild
            n("G4", 21.0, 0.75),
            n("A4", 21.75, 0.25),
            n("G4", 22.0, 0.5),
            n("E4", 22.5, 1.5),
            // Sleep in heavenly
            n("D5", 24.0, 1.0),
            n("D5", 25.0, 0.5),
            n("F5", 25.5, 0.5),
            n("D5", 26.0, 0.5),
            n("B4", 26.5, 0.5),
            // Peace
            n("C5", 27.0, 1.5),
            n("E5", 28.5, 1.5),
            // Sleep in heavenly
            n("C5", 30.0, 0.5),
            n("G4", 30.5, 0.5),
            n("E4", 31.0, 0.5),
            n("G4", 31.5, 0.5),
            n("F4", 32.0, 0.5),
            n("D4", 32.5, 0.5),
            // Peace
            n("C4", 33.0, 3.0),
        ],
    )
}

fn jingle_bells() -> Song {
    song(
        "Jingle Bells",
        120.0,
        TimeSignature::four_four(),
        vec![
            // Jin-gle bells
            n("E4", 0.0, 0.5),
            n("E4", 0.5, 0.5),
            n("E4", 1.0, 1.0),
            // Jin-gle bells
            n("E4", 2.0, 0.5),
            n("E4", 2.5, 0.5),
            n("E4", 3.0, 1.0),
            // Jin-gle all the way
            n("E4", 4.0, 0.5),
            n("G4", 4.5, 0.5),
            n("C4", 5.0, 0.75),
            n("D4", 5.75, 0.25),
            n("E4", 6.0, 2.0),
            // Oh what fun
            n("F4", 8.0, 0.5),
            n("F4", 8.5, 0.5),
            n("F4", 9.0, 0.75),
            n("F4", 9.75, 0.25),
            // It is to ride
            n("F4", 10.0, 0.5),
            n("E4", 10.5, 0.5),
            n("E4", 11.0, 0.5),
            n("E4", 11.5, 0.25),
            n("E4", 11.75, 0.25),
            // In a one horse open sleigh
            n("E4", 12.0, 0.5),
            n("D4", 12.5, 0.5),
            n("D4", 13.0, 0.5),
            n("E4", 13.5, 0.5),
            n("D4", 14.0, 1.0),
            n("G4", 15.0, 1.0),
            // Repeat chorus
            n("E4", 16.0, 0.5),
            n("E4", 16.5, 0.5),
            n("E4", 17.0, 1.0),
            n("E4", 18.0, 0.5),
            n("E4", 18.5, 0.5),
            n("E4", 19.0, 1.0),
            n("E4", 20.0, 0.5),
            n("G4", 20.5, 0.5),
            n("C4", 21.0, 0.75),
            n("D4", 21.75, 0.25),
            n("E4", 22.0, 2.0),
            // Oh what fun it is to ride
            n("F4", 24.0, 0.5),
            n("F4", 24.5, 0.5),
            n("F4", 25.0, 0.75),
            n("F4", 25.75, 0.25),
            n("F4", 26.0, 0.5),
            n("E4", 26.5, 0.5),
            n("E4", 27.0, 0.5),
            n("E4", 27.5, 0.25),
            n("E4", 27.75, 0.25),
            // In a one horse open sleigh
            n("G4", 28.0, 0.5),
            n("G4", 28.5, 0.5),
            n("F4", 29.0, 0.5),
            n("D4", 29.5, 0.5),
            n("C4", 30.0, 2.0),
        ],
    )
}

fn we_wish_you_a_merry_christmas() -> Song {
    song(
        "We Wish You a Merry Christmas",
        100.0,
        TimeSignature::three_four(),
        vec![
            // We wish you a merry
            n("G4", 0.0, 0.5),
            n("C5", 0.5, 0.5),
            n("C5", 1.0, 0.25),
            n("D5", 1.25, 0.25),
            n("C5", 1.5, 0.25),
            n("B4", 1.75, 0.25),
            // Christmas, we
            n("A4", 2.0, 0.5),
            n("A4", 2.5, 0.5),
            n("A4", 3.0, 0.5),
            // Wish you a merry
            n("D5", 3.5, 0.5),
            n("D5", 4.0, 0.25),
            n("E5", 4.25, 0.25),
            n("D5", 4.5, 0.25),
            n("C5", 4.75, 0.25),
            // Christmas, we
            n("B4", 5.0, 0.5),
            n("G4", 5.5, 0.5),
            n("G4", 6.0, 0.5),
            // Wish you a merry
            n("E5", 6.5, 0.5),
            n("E5", 7.0, 0.25),
            n("F5", 7.25, 0.25),
            n("E5", 7.5, 0.25),
            n("D5", 7.75, 0.25),
            // Christmas and a
            n("C5", 8.0, 0.5),
            n("A4", 8.5, 0.5),
            n("G4", 9.0, 0.25),
            n("G4", 9.25, 0.25),
            // Happy new
            n("A4", 9.5, 0.5),
            n("D5", 10.0, 0.5),
            n("B4", 10.5, 0.5),
            // Year
            n("C5", 11.0, 1.5),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::Pitch;
    use crate::timing::{MAX_TEMPO, MIN_TEMPO};

    #[test]
    fn test_library_contents() {
        let songs = builtin_songs();
        assert_eq!(songs.len(), 3);
        assert_eq!(songs[0].name, "Silent Night");
        assert_eq!(songs[1].name, "Jingle Bells");
        assert_eq!(songs[2].name, "We Wish You a Merry Christmas");
    }

    #[test]
    fn test_builtin_songs_are_playable() {
        for song in builtin_songs() {
            assert!(!song.notes.is_empty(), "{} has no notes", song.name);
            assert!(
                song.tempo >= MIN_TEMPO && song.tempo <= MAX_TEMPO,
                "{} tempo out of range",
                song.name
            );
            assert_eq!(song.origin, SongOrigin::BuiltIn);

            // Every pitch must be on the comb
            for note in &song.notes {
                assert!(
                    Pitch::from_name(&note.pitch).is_some(),
                    "{} uses unsupported pitch {}",
                    song.name,
                    note.pitch
                );
                assert!(note.time >= 0.0);
                assert!(note.duration > 0.0);
            }
        }
    }
}
