use super::fs_backend::FsBackend;
use super::record_store::BackedStore;
use crate::error::Result;
use std::path::PathBuf;

pub type FileStore = BackedStore<FsBackend>;

impl FileStore {
    /// Open (or lazily create, on first insert) the JSON file at `path`.
    pub fn open_file(path: impl Into<PathBuf>) -> Result<Self> {
        BackedStore::open(FsBackend::new(path))
    }
}
