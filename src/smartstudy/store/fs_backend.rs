use super::backend::StorageBackend;
use crate::error::{Result, StudyError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const ITEM_EXT: &str = ".json";

/// Directory-backed storage: one `<key>.json` file per key.
///
/// ```text
/// <root>/
/// ├── smartstudy_db_users.json
/// ├── smartstudy_db_courses.json
/// ├── ...
/// └── smartstudy_current_user.json
/// ```
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`. Keys become file names, so only a
    /// conservative character set is accepted.
    pub fn item_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(StudyError::Store(format!("Invalid storage key: '{}'", key)));
        }
        Ok(self.root.join(format!("{}{}", key, ITEM_EXT)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(StudyError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StudyError::Io(e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let target = self.item_path(key)?;
        self.ensure_dir()?;

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, value).map_err(StudyError::Io)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(StudyError::Io(e));
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StudyError::Io(e)),
        }
    }

    fn is_available(&self) -> bool {
        !self.root.exists() || self.root.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path_rejects_traversal() {
        let backend = FsBackend::new(PathBuf::from("/tmp/smartstudy-test"));
        assert!(backend.item_path("smartstudy_db_users").is_ok());
        assert!(backend.item_path("../etc/passwd").is_err());
        assert!(backend.item_path("a/b").is_err());
        assert!(backend.item_path(".hidden").is_err());
        assert!(backend.item_path("").is_err());
    }

    #[test]
    fn test_root_that_is_a_file_is_unavailable() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("not-a-dir");
        fs::write(&file, "x").unwrap();
        assert!(!FsBackend::new(file).is_available());
        assert!(FsBackend::new(temp.path().join("later")).is_available());
    }
}
