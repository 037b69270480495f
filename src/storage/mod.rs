// Recordings store - persistence for user-recorded songs
// Flat JSON array of songs in a single per-user file

use crate::song::Song;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid import payload: {0}")]
    ImportFormat(String),
}

/// File-backed list of user recordings
///
/// The on-disk format is a flat JSON array of songs, the same shape the
/// export/import exchange uses. A missing file reads as an empty list.
pub struct RecordingStore {
    path: PathBuf,
}

impl RecordingStore {
    /// Store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default per-user location
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("musicbox").join("recordings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all recordings; a missing file is an empty list
    pub fn load(&self) -> Result<Vec<Song>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Append one recording
    pub fn save(&self, song: &Song) -> Result<(), StorageError> {
        let mut recordings = self.load()?;
        recordings.push(song.clone());
        self.write(&recordings)
    }

    /// Remove every recording with the given name
    ///
    /// Returns true if anything was removed.
    pub fn delete_by_name(&self, name: &str) -> Result<bool, StorageError> {
        let recordings = self.load()?;
        let before = recordings.len();
        let kept: Vec<Song> = recordings.into_iter().filter(|s| s.name != name).collect();

        let changed = kept.len() != before;
        if changed {
            self.write(&kept)?;
        }
        Ok(changed)
    }

    /// All recordings as a pretty-printed JSON array, for export
    pub fn export_json(&self) -> Result<String, StorageError> {
        let recordings = self.load()?;
        Ok(serde_json::to_string_pretty(&recordings)?)
    }

    /// Merge an exported JSON array into the store
    ///
    /// The payload must be an array, and every element must carry a
    /// non-empty `name` and an array-valued `notes`. Any violation
    /// rejects the whole payload; nothing is merged partially. Returns
    /// the number of merged recordings.
    pub fn import_json(&self, payload: &str) -> Result<usize, StorageError> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| StorageError::ImportFormat(format!("not valid JSON: {}", e)))?;

        let items = value
            .as_array()
            .ok_or_else(|| StorageError::ImportFormat("expected a JSON array".to_string()))?;

        for (i, item) in items.iter().enumerate() {
            let name = item.get("name").and_then(Value::as_str).unwrap_or("");
            if name.is_empty() {
                return Err(StorageError::ImportFormat(format!(
                    "song at index {} has no name",
                    i
                )));
            }
            if !item.get("notes").is_some_and(Value::is_array) {
                return Err(StorageError::ImportFormat(format!(
                    "song at index {} has no notes array",
                    i
                )));
            }
        }

        let imported: Vec<Song> = serde_json::from_value(value)?;
        let count = imported.len();

        let mut recordings = self.load()?;
        recordings.extend(imported);
        self.write(&recordings)?;

        Ok(count)
    }

    fn write(&self, recordings: &[Song]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(recordings)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::{Note, SongOrigin};
    use crate::timing::TimeSignature;
    use tempfile::tempdir;

    fn test_song(name: &str) -> Song {
        Song {
            name: name.to_string(),
            tempo: 100.0,
            time_signature: TimeSignature::four_four(),
            notes: vec![Note::new("C4", 0.0, 0.5)],
            created_at: "2024-12-01T12:00:00Z".to_string(),
            origin: SongOrigin::UserRecording,
        }
    }

    fn temp_store() -> (tempfile::TempDir, RecordingStore) {
        let dir = tempdir().unwrap();
        let store = RecordingStore::new(dir.path().join("recordings.json"));
        (dir, store)
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_dir, store) = temp_store();

        store.save(&test_song("Take 1")).unwrap();
        store.save(&test_song("Take 2")).unwrap();

        let recordings = store.load().unwrap();
        assert_eq!(recordings.len(), 2);
        assert_eq!(recordings[0].name, "Take 1");
        assert_eq!(recordings[1].name, "Take 2");
        assert_eq!(recordings[0].notes.len(), 1);
    }

    #[test]
    fn test_delete_by_name() {
        let (_dir, store) = temp_store();

        store.save(&test_song("Keep")).unwrap();
        store.save(&test_song("Drop")).unwrap();

        assert!(store.delete_by_name("Drop").unwrap());
        assert!(!store.delete_by_name("Drop").unwrap());

        let recordings = store.load().unwrap();
        assert_eq!(recordings.len(), 1);
        assert_eq!(recordings[0].name, "Keep");
    }

    #[test]
    fn test_import_merges_valid_payload() {
        let (_dir, store) = temp_store();
        store.save(&test_song("Existing")).unwrap();

        let payload = r#"[
            {"name": "A", "notes": []},
            {"name": "B", "notes": [{"pitch": "C4", "time": 0, "duration": 0.5}]}
        ]"#;

        let count = store.import_json(payload).unwrap();
        assert_eq!(count, 2);

        let recordings = store.load().unwrap();
        assert_eq!(recordings.len(), 3);
        assert_eq!(recordings[1].name, "A");
        assert_eq!(recordings[2].notes[0].pitch, "C4");
    }

    #[test]
    fn test_import_rejects_non_array() {
        let (_dir, store) = temp_store();
        store.save(&test_song("Existing")).unwrap();

        let err = store.import_json(r#"{"not": "an array"}"#).unwrap_err();
        assert!(matches!(err, StorageError::ImportFormat(_)));

        // Nothing merged
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_import_rejects_bad_element_without_partial_merge() {
        let (_dir, store) = temp_store();

        // Second element is valid, but the first poisons the whole import
        let payload = r#"[
            {"name": "", "notes": []},
            {"name": "Good", "notes": []}
        ]"#;
        let err = store.import_json(payload).unwrap_err();
        assert!(err.to_string().contains("index 0"));
        assert!(store.load().unwrap().is_empty());

        let payload = r#"[{"name": "NoNotes"}]"#;
        assert!(matches!(
            store.import_json(payload),
            Err(StorageError::ImportFormat(_))
        ));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_import_rejects_garbage() {
        let (_dir, store) = temp_store();
        assert!(matches!(
            store.import_json("not json at all"),
            Err(StorageError::ImportFormat(_))
        ));
    }

    #[test]
    fn test_export_is_importable() {
        let (_dir, store) = temp_store();
        store.save(&test_song("Round Trip")).unwrap();

        let exported = store.export_json().unwrap();

        let (_dir2, other) = temp_store();
        assert_eq!(other.import_json(&exported).unwrap(), 1);
        assert_eq!(other.load().unwrap()[0].name, "Round Trip");
    }
}
