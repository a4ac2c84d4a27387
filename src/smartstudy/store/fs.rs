use super::document_store::DocumentStore;
use super::fs_backend::FsBackend;
use super::KeyLayout;
use crate::config::StudyConfig;
use std::path::PathBuf;

pub type FileStore = DocumentStore<FsBackend>;

impl FileStore {
    /// Opens (and initializes, if needed) the store kept in `data_dir`.
    pub fn open(data_dir: PathBuf, config: &StudyConfig) -> Self {
        DocumentStore::new(FsBackend::new(data_dir), KeyLayout::from_config(config))
    }

    pub fn data_dir(&self) -> &std::path::Path {
        self.backend.root()
    }
}
