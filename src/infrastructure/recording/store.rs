//! Recording file storage

use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Names and places memo files in the local data directory
pub struct RecordingStore {
    base_dir: PathBuf,
}

impl RecordingStore {
    /// Create a store rooted at the default recordings directory
    pub fn new() -> Self {
        let base_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("tapedeck")
            .join("recordings");

        Self { base_dir }
    }

    /// Create a store rooted at a custom directory
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: dir.into(),
        }
    }

    /// Get the recordings directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Reserve a path for a new memo, creating the recordings
    /// directory on demand
    pub fn new_recording_path(&self) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.base_dir)?;

        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        Ok(self.base_dir.join(format!("memo-{stamp}.wav")))
    }
}

impl Default for RecordingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dir_is_under_local_data() {
        let store = RecordingStore::new();
        let dir = store.base_dir().to_string_lossy().to_string();
        assert!(dir.contains("tapedeck"));
        assert!(dir.contains("recordings"));
    }

    #[test]
    fn new_recording_path_creates_the_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("recordings");
        let store = RecordingStore::with_dir(&dir);

        let path = store.new_recording_path().unwrap();

        assert!(dir.is_dir());
        assert_eq!(path.parent(), Some(dir.as_path()));
    }

    #[test]
    fn memo_names_are_timestamped_wav_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordingStore::with_dir(tmp.path());

        let path = store.new_recording_path().unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();

        assert!(name.starts_with("memo-"));
        assert!(name.ends_with(".wav"));
    }
}
