use super::backend::StorageBackend;
use crate::error::{PokedexError, Result};
use crate::model::Record;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Persists the record set as a pretty-printed JSON array in a single file.
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(PokedexError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_records(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(PokedexError::Io)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<Record> =
            serde_json::from_str(&content).map_err(PokedexError::Serialization)?;
        Ok(records)
    }

    fn save_records(&self, records: &[Record]) -> Result<()> {
        let dir = self.parent_dir();
        self.ensure_dir(&dir)?;

        let content = serde_json::to_string_pretty(records).map_err(PokedexError::Serialization)?;

        // Atomic write: a reader sees either the old file or the new one
        let tmp_file = dir.join(format!(".records-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(PokedexError::Io)?;
        fs::rename(&tmp_file, &self.path).map_err(PokedexError::Io)?;

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
