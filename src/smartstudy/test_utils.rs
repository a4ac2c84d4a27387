use crate::config::StudyConfig;
use crate::store::fs::FileStore;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // Keeps the directory alive for as long as the store uses it
    pub _temp_dir: TempDir,
    pub store: FileStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FileStore::open(root.clone(), &StudyConfig::default());
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }

    /// A second store over the same directory, as a restarted process would see it.
    pub fn reopen(&self) -> FileStore {
        FileStore::open(self.root.clone(), &StudyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Fields, COURSES};

    #[test]
    fn test_env_store_persists_across_reopen() {
        let mut env = TestEnv::new();
        assert!(env.store.freshly_created());
        let doc = env.store.add_document(COURSES, Fields::new()).unwrap();

        let reopened = env.reopen();
        assert!(!reopened.freshly_created());
        assert_eq!(reopened.get_document(COURSES, &doc.id), Some(doc));
        assert!(env.root.join("smartstudy_db_courses.json").exists());
    }
}
