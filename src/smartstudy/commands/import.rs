use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StudyError};
use crate::store::backend::StorageBackend;
use crate::store::document_store::DocumentStore;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Loads an export file. Collections in the file replace the stored ones;
/// collections missing from the file are left alone.
pub fn run<B: StorageBackend>(db: &mut DocumentStore<B>, path: &Path) -> Result<CmdResult> {
    let content = fs::read_to_string(path).map_err(StudyError::Io)?;
    let data: Value = serde_json::from_str(&content).map_err(StudyError::Serialization)?;
    let report = db.import_database(&data)?;

    let mut result = CmdResult::default();
    for (name, count) in &report.imported {
        result.add_message(CmdMessage::info(format!("{}: {} documents", name, count)));
    }
    for name in &report.skipped {
        result.add_message(CmdMessage::warning(format!(
            "Skipped '{}': not an array of documents",
            name
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Imported {} collections from {}",
        report.imported.len(),
        path.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{export, MessageLevel};
    use crate::model::{Fields, COURSES, SETTINGS};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_import_exported_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("backup.json");

        let mut source = InMemoryStore::in_memory();
        source.add_document(COURSES, Fields::new()).unwrap();
        export::run(&source, Some(&file)).unwrap();

        let mut target = InMemoryStore::in_memory();
        let result = run(&mut target, &file).unwrap();
        assert!(result.has_level(MessageLevel::Success));
        assert!(!result.has_level(MessageLevel::Warning));
        assert_eq!(target.export_database(), source.export_database());
    }

    #[test]
    fn test_import_warns_about_skipped_collections() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("partial.json");
        fs::write(&file, r#"{"courses": [{"id": "c1"}], "settings": "dark"}"#).unwrap();

        let mut db = InMemoryStore::in_memory();
        let result = run(&mut db, &file).unwrap();
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning && m.content.contains("settings")));
        assert_eq!(db.get_collection(COURSES).len(), 1);
        assert_eq!(db.get_collection(SETTINGS).len(), 1);
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("broken.json");
        fs::write(&file, "{oops").unwrap();

        let mut db = InMemoryStore::in_memory();
        assert!(matches!(
            run(&mut db, &file),
            Err(StudyError::Serialization(_))
        ));
    }

    #[test]
    fn test_import_missing_file() {
        let mut db = InMemoryStore::in_memory();
        assert!(matches!(
            run(&mut db, Path::new("/definitely/not/here.json")),
            Err(StudyError::Io(_))
        ));
    }
}
